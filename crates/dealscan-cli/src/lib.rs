/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

/// Parse a review edit of the form `INDEX:key=value` into its parts.
pub fn parse_edit(spec: &str) -> anyhow::Result<(usize, String, String)> {
    let (index, rest) = spec
        .split_once(':')
        .ok_or_else(|| anyhow::anyhow!("Invalid edit (expected INDEX:key=value): {}", spec))?;
    let (key, value) = rest
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("Invalid edit (expected INDEX:key=value): {}", spec))?;
    if key.is_empty() {
        return Err(anyhow::anyhow!("Invalid edit (empty key): {}", spec));
    }
    let index: usize = index
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid edit index: {}", spec))?;
    Ok((index, key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_edit_well_formed() {
        let (i, k, v) = parse_edit("0:rent=1200").unwrap();
        assert_eq!((i, k.as_str(), v.as_str()), (0, "rent", "1200"));
    }

    #[test]
    fn parse_edit_value_may_contain_equals() {
        let (_, k, v) = parse_edit("2:note=a=b").unwrap();
        assert_eq!(k, "note");
        assert_eq!(v, "a=b");
    }

    #[test]
    fn parse_edit_rejects_malformed() {
        assert!(parse_edit("rent=1200").is_err());
        assert!(parse_edit("0:rent").is_err());
        assert!(parse_edit("x:rent=1").is_err());
        assert!(parse_edit("0:=1").is_err());
    }
}
