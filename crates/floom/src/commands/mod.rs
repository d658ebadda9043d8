//! Command handlers for the `floom` CLI.

pub mod add;
pub mod clear;
pub mod delete;
pub mod drop_cmd;
pub mod edit;
pub mod fill;
pub mod forms;
pub mod init;
pub mod list;
pub mod load;
pub mod move_cmd;
pub mod save;
pub mod show;
pub mod version;

use anyhow::{Result, bail};

use formloom_core::enums::RuleType;
use formloom_core::field::ValidationRule;

/// Parses a `TYPE[:VALUE[:MESSAGE]]` rule spec from the command line.
///
/// Examples: `required`, `minLength:5`, `maxLength:20:Keep it short`,
/// `email::Please enter a valid address`.
pub fn parse_rule_spec(spec: &str) -> Result<ValidationRule> {
    let mut parts = spec.splitn(3, ':');
    let type_part = parts.next().unwrap_or_default().trim();
    let value_part = parts.next().map(str::trim);
    let message_part = parts.next().map(str::trim);

    let rule_type: RuleType = type_part
        .parse()
        .map_err(|e| anyhow::anyhow!("{e} (in rule spec {spec:?})"))?;

    let mut rule = ValidationRule::new(rule_type);
    match value_part {
        Some("") | None => {}
        Some(v) => {
            if !rule_type.has_value() {
                bail!("rule {type_part:?} does not take a value (in rule spec {spec:?})");
            }
            let bound: u32 = v
                .parse()
                .map_err(|_| anyhow::anyhow!("invalid bound {v:?} in rule spec {spec:?}"))?;
            rule.value = Some(bound);
        }
    }
    if let Some(message) = message_part {
        if !message.is_empty() {
            rule.message = message.to_owned();
        }
    }

    Ok(rule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_bare_rule() {
        let rule = parse_rule_spec("required").unwrap();
        assert_eq!(rule.rule_type, RuleType::Required);
        assert_eq!(rule.value, None);
        assert_eq!(rule.message, "Required validation failed");
    }

    #[test]
    fn parse_rule_with_bound() {
        let rule = parse_rule_spec("minLength:5").unwrap();
        assert_eq!(rule.rule_type, RuleType::MinLength);
        assert_eq!(rule.value, Some(5));
    }

    #[test]
    fn parse_rule_with_bound_and_message() {
        let rule = parse_rule_spec("maxLength:20:Keep it short").unwrap();
        assert_eq!(rule.value, Some(20));
        assert_eq!(rule.message, "Keep it short");
    }

    #[test]
    fn parse_rule_with_message_only() {
        let rule = parse_rule_spec("email::Please enter a valid address").unwrap();
        assert_eq!(rule.rule_type, RuleType::Email);
        assert_eq!(rule.value, None);
        assert_eq!(rule.message, "Please enter a valid address");
    }

    #[test]
    fn parse_rule_rejects_unknown_type() {
        assert!(parse_rule_spec("regex:abc").is_err());
    }

    #[test]
    fn parse_rule_rejects_bound_on_valueless_rule() {
        assert!(parse_rule_spec("required:5").is_err());
    }

    #[test]
    fn message_may_contain_colons() {
        let rule = parse_rule_spec("minLength:5:Need at least 5 chars: really").unwrap();
        assert_eq!(rule.message, "Need at least 5 chars: really");
    }
}
