//! Static violation catalog for the SST questionnaire.
//!
//! Each questionnaire item maps to the infraction a "no" answer reveals,
//! classified by severity with its legal basis. Micro and small companies
//! are excused from the obligations in the MYPE exemption set.

use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;
use shared_types::{Severity, Violation};

lazy_static! {
    static ref CATALOG: HashMap<&'static str, Violation> = {
        let entries = [
            (
                "q1",
                Severity::Serious,
                "No written occupational safety and health policy approved by top management",
                "Ley 29783 art. 22",
            ),
            (
                "q2",
                Severity::Serious,
                "Internal SST regulations handbook not prepared or not handed to workers",
                "D.S. 005-2012-TR art. 74",
            ),
            (
                "q3",
                Severity::Serious,
                "No annual SST plan and program in place",
                "D.S. 005-2012-TR art. 32",
            ),
            (
                "q4",
                Severity::VerySerious,
                "Hazard identification and risk assessment matrix (IPERC) missing or outdated",
                "Ley 29783 art. 57",
            ),
            (
                "q5",
                Severity::Minor,
                "Workplace risk map not posted in a visible location",
                "Ley 29783 art. 35",
            ),
            (
                "q6",
                Severity::Serious,
                "Fewer than four safety and health trainings delivered per year",
                "Ley 29783 art. 35",
            ),
            (
                "q7",
                Severity::Serious,
                "Workers start duties without safety induction for their position",
                "D.S. 005-2012-TR art. 27",
            ),
            (
                "q8",
                Severity::VerySerious,
                "Personal protective equipment not provided free of charge or not replaced",
                "Ley 29783 art. 60",
            ),
            (
                "q9",
                Severity::Serious,
                "No emergency response plan or evacuation drills",
                "D.S. 005-2012-TR art. 83",
            ),
            (
                "q10",
                Severity::Minor,
                "Fire extinguishers unserviced or emergency signage missing",
                "D.S. 005-2012-TR art. 37",
            ),
            (
                "q11",
                Severity::Minor,
                "First-aid kits absent or not stocked for the workforce size",
                "D.S. 005-2012-TR art. 37",
            ),
            (
                "q12",
                Severity::Serious,
                "Occupational medical exams not performed at hiring and periodically",
                "Ley 29783 art. 49",
            ),
            (
                "q13",
                Severity::Serious,
                "No SST committee constituted (or supervisor elected) as the workforce requires",
                "Ley 29783 art. 29",
            ),
            (
                "q14",
                Severity::Minor,
                "SST committee meeting minutes not recorded in the minutes book",
                "D.S. 005-2012-TR art. 71",
            ),
            (
                "q15",
                Severity::VerySerious,
                "Work accidents not reported to the labor authority within the legal deadline",
                "D.S. 005-2012-TR art. 110",
            ),
            (
                "q16",
                Severity::Serious,
                "No procedure to investigate accidents, incidents and occupational diseases",
                "Ley 29783 art. 42",
            ),
            (
                "q17",
                Severity::Serious,
                "SST obligations not coordinated with contractors and subcontractors on site",
                "Ley 29783 art. 68",
            ),
            (
                "q18",
                Severity::VerySerious,
                "Hazardous substances without inventory or safety data sheets available",
                "D.S. 005-2012-TR art. 92",
            ),
            (
                "q19",
                Severity::VerySerious,
                "Machinery operated without guards or lockout provisions",
                "Ley 29783 art. 50",
            ),
            (
                "q20",
                Severity::Serious,
                "SST management system never audited",
                "Ley 29783 art. 43",
            ),
            (
                "q21",
                Severity::Minor,
                "Mandatory SST records incomplete or not retained",
                "D.S. 005-2012-TR art. 33",
            ),
        ];

        entries
            .iter()
            .map(|(question_id, severity, description, statute)| {
                (
                    *question_id,
                    Violation {
                        question_id: (*question_id).to_string(),
                        severity: *severity,
                        description: (*description).to_string(),
                        statute: (*statute).to_string(),
                    },
                )
            })
            .collect()
    };

    /// Obligations the simplified MYPE regime excuses for micro and small
    /// companies: committee, minutes, audits and the heavier documentation.
    static ref MYPE_EXEMPT: HashSet<&'static str> =
        ["q2", "q13", "q14", "q20", "q21"].into_iter().collect();
}

/// Catalog record for a question id, if the id is recognized.
pub fn lookup(question_id: &str) -> Option<&'static Violation> {
    CATALOG.get(question_id)
}

/// Whether a question is excused under the MYPE regime.
pub fn is_exempt(question_id: &str) -> bool {
    MYPE_EXEMPT.contains(question_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_covers_the_whole_questionnaire() {
        for i in 1..=21 {
            let id = format!("q{i}");
            assert!(lookup(&id).is_some(), "missing catalog entry for {id}");
        }
    }

    #[test]
    fn lookup_is_lenient_about_unknown_ids() {
        assert!(lookup("q99").is_none());
        assert!(lookup("").is_none());
        assert!(lookup("Q1").is_none());
    }

    #[test]
    fn exempt_questions_exist_in_the_catalog() {
        for id in ["q2", "q13", "q14", "q20", "q21"] {
            assert!(is_exempt(id));
            assert!(lookup(id).is_some());
        }
        assert!(!is_exempt("q1"));
    }

    #[test]
    fn records_carry_their_own_question_id() {
        let record = lookup("q4").unwrap();
        assert_eq!(record.question_id, "q4");
        assert_eq!(record.severity, Severity::VerySerious);
        assert!(record.statute.contains("29783"));
    }
}
