use ereq_core::responses::{ProgrammeViewResponse, Requirement};
use ereq_store::{AuditLog, RecordCache};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ProgrammeArgs;
use crate::context::AppContext;
use crate::output::output_tabular;

/// Handle `ereq view`.
pub fn handle(args: &ProgrammeArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let store = ctx.session.store()?;
    let response = build(store.records(), store.audit(), &args.programme)?;

    if flags.shows_table_notes() {
        println!("{}\n{}\n", response.programme, response.summary);
    }
    output_tabular(&response, flags.format)
}

/// The filled qualifications of one programme.
pub(crate) fn build(
    records: &RecordCache,
    audit: &AuditLog,
    programme: &str,
) -> anyhow::Result<ProgrammeViewResponse> {
    let record = records.get_by_key(programme)?;
    let schema = records.schema();
    let requirements: Vec<Requirement> = record
        .filled(schema)
        .map(|name| Requirement {
            qualification: name.clone(),
            requirement: record.value(name).to_string(),
        })
        .collect();

    Ok(ProgrammeViewResponse {
        programme: record.key.clone(),
        summary: format!(
            "{} of {} qualifications apply to this programme",
            requirements.len(),
            schema.qualification_names().len()
        ),
        last_updated: audit.last_updated(&record.key).cloned(),
        requirements,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn records() -> RecordCache {
        RecordCache::load(&[
            vec!["Programme", "A Level", "BTEC", "IB"],
            vec!["Law", "AAA", "", "36 points"],
        ])
        .expect("records")
    }

    #[test]
    fn shows_only_filled_qualifications() {
        let response = build(&records(), &AuditLog::default(), "law").expect("view");

        assert_eq!(response.programme, "Law");
        assert_eq!(response.summary, "2 of 3 qualifications apply to this programme");
        assert_eq!(
            response.requirements,
            vec![
                Requirement {
                    qualification: "A Level".into(),
                    requirement: "AAA".into(),
                },
                Requirement {
                    qualification: "IB".into(),
                    requirement: "36 points".into(),
                },
            ]
        );
        assert_eq!(response.last_updated, None);
    }

    #[test]
    fn unknown_programme_is_an_error() {
        let error = build(&records(), &AuditLog::default(), "Medicine").unwrap_err();
        assert!(error.to_string().contains("Medicine"));
    }
}
