//! Table columns for each command response.

use ereq_core::entities::LastUpdate;
use ereq_core::responses::{
    AuditListResponse, ProgrammeListResponse, ProgrammeViewResponse, SaveResponse,
};

use super::Tabular;

fn updated_cell(last: Option<&LastUpdate>) -> String {
    last.map_or_else(
        || String::from("-"),
        |l| format!("{} by {}", l.timestamp, l.actor),
    )
}

fn or_dash(value: &str) -> String {
    if value.is_empty() {
        String::from("-")
    } else {
        value.to_string()
    }
}

impl Tabular for ProgrammeListResponse {
    fn headers(&self) -> Vec<&'static str> {
        vec!["programme", "filled", "complete", "last updated"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.programmes
            .iter()
            .map(|p| {
                vec![
                    p.programme.clone(),
                    format!("{}/{}", p.filled, p.total),
                    format!("{}%", p.percent_complete),
                    updated_cell(p.last_updated.as_ref()),
                ]
            })
            .collect()
    }
}

impl Tabular for ProgrammeViewResponse {
    fn headers(&self) -> Vec<&'static str> {
        vec!["qualification", "requirements"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.requirements
            .iter()
            .map(|r| vec![r.qualification.clone(), r.requirement.clone()])
            .collect()
    }
}

impl Tabular for SaveResponse {
    fn headers(&self) -> Vec<&'static str> {
        vec!["field", "old", "new"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.changes
            .iter()
            .map(|c| vec![c.field_name.clone(), or_dash(&c.old_value), or_dash(&c.new_value)])
            .collect()
    }
}

impl Tabular for AuditListResponse {
    fn headers(&self) -> Vec<&'static str> {
        vec!["when", "who", "programme", "field", "old", "new"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.entries
            .iter()
            .map(|e| {
                vec![
                    e.timestamp.clone(),
                    e.actor().to_string(),
                    e.record_key.clone(),
                    e.field_name.clone(),
                    or_dash(&e.old_value),
                    or_dash(&e.new_value),
                ]
            })
            .collect()
    }
}
