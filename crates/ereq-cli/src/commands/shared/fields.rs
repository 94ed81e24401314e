use ereq_core::entities::FieldSchema;

/// Split a `Field=Value` assignment at the first `=`.
pub fn parse_assignment(raw: &str) -> anyhow::Result<(String, String)> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("expected FIELD=VALUE, got '{raw}'"))?;
    let field = field.trim();
    if field.is_empty() {
        anyhow::bail!("missing field name in '{raw}'");
    }
    Ok((field.to_string(), value.trim().to_string()))
}

/// Fail early, naming the valid choices, when `field` is not a qualification.
pub fn require_qualification(schema: &FieldSchema, field: &str) -> anyhow::Result<()> {
    if schema.is_qualification(field) {
        return Ok(());
    }
    anyhow::bail!(
        "unknown qualification '{field}' (expected one of: {})",
        schema.qualification_names().join(", ")
    )
}
