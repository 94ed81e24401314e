use ereq_core::enums::ExportFormat;
use ereq_core::responses::ProgrammeViewResponse;

use crate::cli::root_commands::ExportArgs;
use crate::commands::shared::parse::parse_enum;
use crate::commands::view;
use crate::context::AppContext;

/// Handle `ereq export`: print the filled requirements as text or HTML.
pub fn handle(args: &ExportArgs, ctx: &mut AppContext) -> anyhow::Result<()> {
    let format: ExportFormat = parse_enum(&args.kind, "export format")?;
    let store = ctx.session.store()?;
    let view = view::build(store.records(), store.audit(), &args.programme)?;

    let rendered = match format {
        ExportFormat::Text => render_text(&view),
        ExportFormat::Html => render_html(&view),
    };
    println!("{rendered}");
    Ok(())
}

fn render_text(view: &ProgrammeViewResponse) -> String {
    let rows: Vec<String> = view
        .requirements
        .iter()
        .map(|r| format!("{}\t{}", r.qualification, r.requirement))
        .collect();
    format!(
        "{}\n\nQualification\tRequirements\n{}",
        view.programme,
        rows.join("\n")
    )
}

fn render_html(view: &ProgrammeViewResponse) -> String {
    let mut html = format!(
        "<h3>{}</h3><table border=\"1\" cellpadding=\"8\" cellspacing=\"0\">\
         <thead><tr><th>Qualification</th><th>Requirements</th></tr></thead><tbody>",
        escape_html(&view.programme)
    );
    for requirement in &view.requirements {
        html.push_str(&format!(
            "<tr><td><strong>{}</strong></td><td>{}</td></tr>",
            escape_html(&requirement.qualification),
            escape_html(&requirement.requirement)
        ));
    }
    html.push_str("</tbody></table>");
    html
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}
