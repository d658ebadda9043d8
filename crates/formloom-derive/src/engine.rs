//! The derivation registry and the two evaluation passes.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use tracing::warn;

use formloom_core::enums::DerivationKind;
use formloom_core::field::FieldDefinition;
use formloom_core::value::FieldValue;

use crate::error::DeriveError;
use crate::graph::DependencyGraph;

/// A derivation function.
///
/// `Ok(None)` means "nothing to compute yet" (a dependency is still unset);
/// the field's current value is left alone. `Err` is a per-field failure:
/// the evaluation loop logs it and moves on.
pub trait Derive {
    fn derive(
        &self,
        field: &FieldDefinition,
        values: &HashMap<String, FieldValue>,
    ) -> Result<Option<FieldValue>, DeriveError>;
}

/// Registry of derivation functions keyed by [`DerivationKind`].
///
/// Fields whose kind has no entry here keep their formula text but never
/// receive a computed value.
pub struct Derivations {
    derivers: HashMap<DerivationKind, Box<dyn Derive>>,
}

impl Derivations {
    /// Creates the registry with the built-in kinds, evaluated against the
    /// current date.
    pub fn new() -> Self {
        Self::with_today(Utc::now().date_naive())
    }

    /// Creates the registry with the built-in kinds, evaluated against an
    /// injected date. Lets tests pin the current year.
    pub fn with_today(today: NaiveDate) -> Self {
        let mut registry = Self {
            derivers: HashMap::new(),
        };
        registry.register(DerivationKind::AgeFromDate, Box::new(AgeFromDate { today }));
        registry
    }

    /// Registers (or replaces) the function for a kind.
    pub fn register(&mut self, kind: DerivationKind, deriver: Box<dyn Derive>) {
        self.derivers.insert(kind, deriver);
    }

    /// Looks a kind's function up.
    pub fn get(&self, kind: &DerivationKind) -> Option<&dyn Derive> {
        self.derivers.get(kind).map(|deriver| deriver.as_ref())
    }
}

impl Default for Derivations {
    fn default() -> Self {
        Self::new()
    }
}

/// Whole-year difference between today and the date in `derived_from[0]`.
///
/// Month and day are ignored: a birthdate anywhere in 2000 yields the same
/// age all through any given year. Not a calendar-exact age.
pub struct AgeFromDate {
    pub today: NaiveDate,
}

impl Derive for AgeFromDate {
    fn derive(
        &self,
        field: &FieldDefinition,
        values: &HashMap<String, FieldValue>,
    ) -> Result<Option<FieldValue>, DeriveError> {
        let dep = field
            .derived_from
            .first()
            .ok_or_else(|| DeriveError::NoDependencies {
                field: field.id.clone(),
            })?;

        let raw = match values.get(dep) {
            Some(v) if !v.is_unset() => v.to_text(),
            _ => return Ok(None),
        };

        let date = parse_date(&raw).ok_or(DeriveError::InvalidDate { value: raw })?;
        let age = i64::from(self.today.year()) - i64::from(date.year());
        Ok(Some(FieldValue::Number(age as f64)))
    }
}

/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, and full RFC 3339 timestamps.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y/%m/%d"))
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Recomputes every derived field, topologically.
///
/// Used once when a form instance is created. Fails only on a dependency
/// cycle; per-field failures are logged and skipped.
pub fn recompute_all(
    fields: &[FieldDefinition],
    values: &mut HashMap<String, FieldValue>,
    derivations: &Derivations,
) -> Result<(), DeriveError> {
    let graph = DependencyGraph::build(fields);
    let order = graph.full_order()?;
    apply(fields, &order, values, derivations);
    Ok(())
}

/// Recomputes the derived fields affected by a change to `changed_id`,
/// topologically. Fields off the changed path are left alone.
pub fn recompute_affected(
    fields: &[FieldDefinition],
    changed_id: &str,
    values: &mut HashMap<String, FieldValue>,
    derivations: &Derivations,
) -> Result<(), DeriveError> {
    let graph = DependencyGraph::build(fields);
    let order = graph.affected_by(changed_id)?;
    apply(fields, &order, values, derivations);
    Ok(())
}

fn apply(
    fields: &[FieldDefinition],
    order: &[&str],
    values: &mut HashMap<String, FieldValue>,
    derivations: &Derivations,
) {
    let by_id: HashMap<&str, &FieldDefinition> =
        fields.iter().map(|f| (f.id.as_str(), f)).collect();

    for &id in order {
        let Some(&field) = by_id.get(id) else { continue };
        // Kindless or unregistered derivations are stored, never executed.
        let Some(kind) = &field.derivation else {
            continue;
        };
        let Some(deriver) = derivations.get(kind) else {
            continue;
        };
        match deriver.derive(field, values) {
            Ok(Some(value)) => {
                values.insert(id.to_owned(), value);
            }
            Ok(None) => {}
            Err(e) => {
                warn!(field = id, error = %e, "derivation failed; value left unset");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formloom_core::enums::FieldType;
    use formloom_core::field::FieldBuilder;
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
    }

    fn birthdate_field() -> FieldDefinition {
        let mut f = FieldBuilder::new("Birthdate", FieldType::Date).build();
        f.id = "fld-birth".into();
        f
    }

    fn age_field() -> FieldDefinition {
        let mut f = FieldBuilder::new("Age", FieldType::Number)
            .derived(vec!["fld-birth".into()], "age from birthdate")
            .build();
        f.id = "fld-age".into();
        f
    }

    fn values(pairs: &[(&str, FieldValue)]) -> HashMap<String, FieldValue> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn age_ignores_month_and_day() {
        let fields = vec![birthdate_field(), age_field()];
        let derivations = Derivations::with_today(today());

        for date in ["2000-01-01", "2000-06-01", "2000-12-31"] {
            let mut vals = values(&[("fld-birth", FieldValue::Text(date.into()))]);
            recompute_affected(&fields, "fld-birth", &mut vals, &derivations).unwrap();
            assert_eq!(
                vals.get("fld-age"),
                Some(&FieldValue::Number(26.0)),
                "birthdate {date}"
            );
        }
    }

    #[test]
    fn unset_dependency_leaves_value_unset() {
        let fields = vec![birthdate_field(), age_field()];
        let derivations = Derivations::with_today(today());

        let mut vals = HashMap::new();
        recompute_all(&fields, &mut vals, &derivations).unwrap();
        assert!(!vals.contains_key("fld-age"));

        let mut vals = values(&[("fld-birth", FieldValue::Text(String::new()))]);
        recompute_affected(&fields, "fld-birth", &mut vals, &derivations).unwrap();
        assert!(!vals.contains_key("fld-age"));
    }

    #[test]
    fn malformed_date_does_not_abort_other_fields() {
        let mut other_src = birthdate_field();
        other_src.id = "fld-b2".into();
        let mut other_age = age_field();
        other_age.id = "fld-age2".into();
        other_age.derived_from = vec!["fld-b2".into()];

        let fields = vec![birthdate_field(), age_field(), other_src, other_age];
        let derivations = Derivations::with_today(today());

        let mut vals = values(&[
            ("fld-birth", FieldValue::Text("not-a-date".into())),
            ("fld-b2", FieldValue::Text("1990-01-01".into())),
        ]);
        recompute_all(&fields, &mut vals, &derivations).unwrap();

        assert!(!vals.contains_key("fld-age"), "failed field stays unset");
        assert_eq!(vals.get("fld-age2"), Some(&FieldValue::Number(36.0)));
    }

    #[test]
    fn unrecognized_formula_never_computes() {
        let mut field = FieldBuilder::new("Total", FieldType::Number)
            .derived(vec!["fld-birth".into()], "sum of everything")
            .build();
        field.id = "fld-total".into();

        let fields = vec![birthdate_field(), field];
        let derivations = Derivations::with_today(today());

        let mut vals = values(&[("fld-birth", FieldValue::Text("2000-01-01".into()))]);
        recompute_all(&fields, &mut vals, &derivations).unwrap();
        assert!(!vals.contains_key("fld-total"));
    }

    #[test]
    fn direct_write_to_derived_field_is_overwritten_on_next_pass() {
        let fields = vec![birthdate_field(), age_field()];
        let derivations = Derivations::with_today(today());

        let mut vals = values(&[
            ("fld-birth", FieldValue::Text("2000-01-01".into())),
            ("fld-age", FieldValue::Number(99.0)),
        ]);
        recompute_affected(&fields, "fld-age", &mut vals, &derivations).unwrap();
        assert_eq!(vals.get("fld-age"), Some(&FieldValue::Number(26.0)));
    }

    #[test]
    fn chained_derivations_evaluate_in_order() {
        // birth -> age -> echo (a custom deriver that copies its dependency).
        struct Echo;
        impl Derive for Echo {
            fn derive(
                &self,
                field: &FieldDefinition,
                values: &HashMap<String, FieldValue>,
            ) -> Result<Option<FieldValue>, DeriveError> {
                Ok(field
                    .derived_from
                    .first()
                    .and_then(|dep| values.get(dep))
                    .cloned())
            }
        }

        let mut echo = FieldBuilder::new("Echo", FieldType::Number)
            .derived(vec!["fld-age".into()], "echo")
            .derivation_kind(DerivationKind::Custom("echo".into()))
            .build();
        echo.id = "fld-echo".into();

        let fields = vec![birthdate_field(), age_field(), echo];
        let mut derivations = Derivations::with_today(today());
        derivations.register(DerivationKind::Custom("echo".into()), Box::new(Echo));

        let mut vals = values(&[("fld-birth", FieldValue::Text("2000-06-01".into()))]);
        recompute_affected(&fields, "fld-birth", &mut vals, &derivations).unwrap();

        assert_eq!(vals.get("fld-age"), Some(&FieldValue::Number(26.0)));
        assert_eq!(vals.get("fld-echo"), Some(&FieldValue::Number(26.0)));
    }

    #[test]
    fn cycle_fails_the_pass() {
        let mut a = age_field();
        a.id = "fld-a".into();
        a.derived_from = vec!["fld-b".into()];
        let mut b = age_field();
        b.id = "fld-b".into();
        b.derived_from = vec!["fld-a".into()];

        let derivations = Derivations::with_today(today());
        let mut vals = HashMap::new();
        assert!(matches!(
            recompute_all(&[a, b], &mut vals, &derivations),
            Err(DeriveError::CycleDetected)
        ));
    }

    #[test]
    fn parse_date_formats() {
        assert!(parse_date("2000-06-01").is_some());
        assert!(parse_date("2000/06/01").is_some());
        assert!(parse_date("2000-06-01T10:00:00Z").is_some());
        assert!(parse_date("June 1st").is_none());
        assert!(parse_date("").is_none());
    }
}
