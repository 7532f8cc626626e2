//! Raw query parameters parsed from a URL query string.

use log::trace;
use url::form_urlencoded;

use super::ColumnFilter;
use super::Direction;
use super::Operator;
use super::Query;
use super::QueryConfig;
use super::SortKey;
use crate::error::QueryError;
use crate::model::Columns;
use crate::model::Value;

/// The string-typed form of a list request, as received by a list endpoint.
///
/// Recognized keys:
///
/// | Key | Meaning |
/// |-----|---------|
/// | `page`, `limit` | pagination window |
/// | `search` | free-text search |
/// | `sort` | `field:dir` pairs separated by `,` (direction defaults to `asc`) |
/// | `fields` | projected fields |
/// | `searchFields` | fields tested by the free-text search |
/// | `filter[field][op]` | column filter with an explicit operator |
/// | any other key | equality filter on that field |
///
/// Operators and directions stay unparsed until [`into_query`](Self::into_query),
/// which is where an unknown operator is reported.
///
/// # Example
///
/// ```
/// use tabula_lib::query::{QueryConfig, QueryParams};
///
/// let params = QueryParams::parse(
///     "page=2&limit=5&sort=price:desc&filter[price][gte]=100&category=audio",
///     &QueryConfig::default(),
/// )?;
/// assert_eq!(params.page, Some(2));
/// assert_eq!(params.filters.len(), 2);
/// # Ok::<(), tabula_lib::error::QueryError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    /// `(field, direction)` pairs.
    pub sort: Vec<(String, String)>,
    /// `(field, operator, value)` triples.
    pub filters: Vec<(String, String, Value)>,
    pub fields: Vec<String>,
    pub search_fields: Vec<String>,
}

impl QueryParams {
    /// Parses a query string. A leading `?` is ignored.
    ///
    /// Fails only on values that cannot be read at all, such as a
    /// non-numeric `page`. Requested page sizes above
    /// [`QueryConfig::max_limit`] are clamped.
    pub fn parse(query: &str, config: &QueryConfig) -> Result<Self, QueryError> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = QueryParams::default();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "page" => params.page = Some(parse_int("page", &value)?),
                "limit" => {
                    let limit = parse_int("limit", &value)?;
                    params.limit = Some(limit.min(config.max_limit));
                }
                "search" => params.search = Some(value.trim().to_string()),
                "sort" => {
                    for item in split_list(&value, config.list_separator) {
                        let (field, direction) = match item.split_once(config.sort_separator) {
                            Some((field, direction)) => (field.trim(), direction.trim()),
                            None => (item, Direction::Asc.as_str()),
                        };
                        params.sort.push((field.to_string(), direction.to_string()));
                    }
                }
                "fields" => params.fields = split_owned(&value, config.list_separator),
                "searchFields" => params.search_fields = split_owned(&value, config.list_separator),
                key if key.starts_with("filter[") => {
                    let (field, op) = parse_filter_key(key)?;
                    let value = if op.parse::<Operator>().is_ok_and(|op| op.takes_list()) {
                        Value::List(
                            split_list(&value, config.list_separator)
                                .map(infer_value)
                                .collect(),
                        )
                    } else {
                        infer_value(&value)
                    };
                    params.filters.push((field, op, value));
                }
                field => {
                    params
                        .filters
                        .push((field.to_string(), Operator::Eq.as_str().to_string(), infer_value(&value)));
                }
            }
        }

        trace!("Parsed query params: {:?}", params);
        Ok(params)
    }

    /// Validates these parameters against a column set.
    ///
    /// Missing `page`/`limit` fall back to the config defaults. The default
    /// limit is clamped to [`QueryConfig::max_limit`] like an explicit one.
    pub fn into_query<R>(self, columns: &Columns<R>, config: &QueryConfig) -> Result<Query, QueryError> {
        let sort = self
            .sort
            .into_iter()
            .map(|(field, direction)| -> Result<SortKey, QueryError> {
                Ok(SortKey {
                    field,
                    direction: direction.parse()?,
                })
            })
            .collect::<Result<Vec<_>, QueryError>>()?;

        let filters = self
            .filters
            .into_iter()
            .map(|(field, op, value)| -> Result<ColumnFilter, QueryError> {
                Ok(ColumnFilter::new(field, op.parse::<Operator>()?, value))
            })
            .collect::<Result<Vec<_>, QueryError>>()?;

        Query::builder()
            .page(self.page.unwrap_or(config.default_page))
            .limit(self.limit.unwrap_or(config.default_limit).min(config.max_limit))
            .search(self.search.unwrap_or_default())
            .sorts(sort)
            .filters(filters)
            .fields(self.fields)
            .search_fields(self.search_fields)
            .build(columns)
    }
}

fn parse_int(key: &str, value: &str) -> Result<i64, QueryError> {
    value
        .trim()
        .parse()
        .map_err(|_| QueryError::malformed(key, format!("expected an integer, got '{}'", value)))
}

/// Parses `filter[field][op]`.
fn parse_filter_key(key: &str) -> Result<(String, String), QueryError> {
    let malformed = || QueryError::malformed(key, "expected filter[field][operator]");

    let rest = key.strip_prefix("filter[").ok_or_else(malformed)?;
    let (field, rest) = rest.split_once("][").ok_or_else(malformed)?;
    let op = rest.strip_suffix(']').ok_or_else(malformed)?;
    if field.is_empty() || op.is_empty() {
        return Err(malformed());
    }
    Ok((field.to_string(), op.to_string()))
}

fn split_list(value: &str, separator: char) -> impl Iterator<Item = &str> {
    value.split(separator).map(str::trim).filter(|s| !s.is_empty())
}

fn split_owned(value: &str, separator: char) -> Vec<String> {
    split_list(value, separator).map(str::to_string).collect()
}

/// Types a raw scalar: booleans, integers and finite floats are recognized,
/// everything else stays a string.
///
/// A number is only inferred when it renders back to the exact raw text, so
/// `007` or `1.50` stay strings and still match text fields verbatim.
fn infer_value(raw: &str) -> Value {
    match raw {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        "null" => return Value::Null,
        _ => {}
    }
    if let Some(n) = raw.parse::<i64>().ok().filter(|n| n.to_string() == raw) {
        return Value::Int(n);
    }
    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() && n.to_string() == raw => Value::Float(n),
        _ => Value::String(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Column;
    use crate::model::Record;

    fn columns() -> Columns<Record> {
        vec![
            Column::record_field("name", "Name"),
            Column::record_field("price", "Price"),
            Column::record_field("category", "Category"),
        ]
        .into()
    }

    #[test]
    fn test_parse_full_query() {
        let params = QueryParams::parse(
            "?page=3&limit=20&search=lap%20top&sort=price:desc,name&fields=name,price&searchFields=name&filter[category][in]=audio,video&filter[price][gt]=9.5",
            &QueryConfig::default(),
        )
        .unwrap();

        assert_eq!(params.page, Some(3));
        assert_eq!(params.limit, Some(20));
        assert_eq!(params.search.as_deref(), Some("lap top"));
        assert_eq!(
            params.sort,
            vec![
                ("price".to_string(), "desc".to_string()),
                ("name".to_string(), "asc".to_string()),
            ]
        );
        assert_eq!(params.fields, vec!["name", "price"]);
        assert_eq!(params.search_fields, vec!["name"]);
        assert_eq!(
            params.filters,
            vec![
                (
                    "category".to_string(),
                    "in".to_string(),
                    Value::from(vec!["audio", "video"])
                ),
                ("price".to_string(), "gt".to_string(), Value::Float(9.5)),
            ]
        );
    }

    #[test]
    fn test_bare_keys_are_equality_filters() {
        let params = QueryParams::parse("category=audio&active=true", &QueryConfig::default()).unwrap();
        assert_eq!(
            params.filters,
            vec![
                ("category".to_string(), "eq".to_string(), Value::from("audio")),
                ("active".to_string(), "eq".to_string(), Value::Bool(true)),
            ]
        );
    }

    #[test]
    fn test_limit_clamped_to_max() {
        let config = QueryConfig::default().with_max_limit(50);
        let params = QueryParams::parse("limit=500", &config).unwrap();
        assert_eq!(params.limit, Some(50));
    }

    #[test]
    fn test_numbers_that_do_not_round_trip_stay_text() {
        let params = QueryParams::parse(
            "sku=007&filter[price][eq]=1.50&filter[zip][in]=01234,42&filter[code][contains]=007",
            &QueryConfig::default(),
        )
        .unwrap();
        assert_eq!(
            params.filters,
            vec![
                ("sku".to_string(), "eq".to_string(), Value::from("007")),
                ("price".to_string(), "eq".to_string(), Value::from("1.50")),
                (
                    "zip".to_string(),
                    "in".to_string(),
                    Value::List(vec![Value::from("01234"), Value::Int(42)])
                ),
                ("code".to_string(), "contains".to_string(), Value::from("007")),
            ]
        );
    }

    #[test]
    fn test_leading_zero_text_field_matches_verbatim() {
        let columns: Columns<Record> = vec![Column::record_field("sku", "SKU")].into();
        let rows = vec![Record::new("1").set("sku", "007"), Record::new("2").set("sku", "7")];
        let config = QueryConfig::default();

        let matched = |query: &str| -> Vec<String> {
            let query = QueryParams::parse(query, &config)
                .unwrap()
                .into_query(&columns, &config)
                .unwrap();
            crate::engine::run(&rows, &columns, &query)
                .data()
                .iter()
                .map(|r| r.id().to_string())
                .collect()
        };

        assert_eq!(matched("sku=007"), vec!["1"]);
        assert_eq!(matched("filter[sku][in]=007,008"), vec!["1"]);
        assert_eq!(matched("filter[sku][nin]=007"), vec!["2"]);
        assert_eq!(matched("filter[sku][contains]=007"), vec!["1"]);
        assert_eq!(matched("sku=7"), vec!["2"]);
    }

    #[test]
    fn test_search_is_trimmed_at_the_boundary() {
        let params = QueryParams::parse("search=%20%20lap%20", &QueryConfig::default()).unwrap();
        assert_eq!(params.search.as_deref(), Some("lap"));
    }

    #[test]
    fn test_default_limit_is_clamped_too() {
        let config = QueryConfig::default().with_max_limit(5);
        let query = QueryParams::parse("", &config)
            .unwrap()
            .into_query(&columns(), &config)
            .unwrap();
        assert_eq!(query.limit(), 5);
    }

    #[test]
    fn test_malformed_values() {
        let config = QueryConfig::default();
        assert!(matches!(
            QueryParams::parse("page=two", &config),
            Err(QueryError::Malformed { .. })
        ));
        assert!(matches!(
            QueryParams::parse("filter[price]=3", &config),
            Err(QueryError::Malformed { .. })
        ));
    }

    #[test]
    fn test_into_query_defaults_and_validation() {
        let config = QueryConfig::default().with_default_limit(25);
        let query = QueryParams::parse("", &config)
            .unwrap()
            .into_query(&columns(), &config)
            .unwrap();
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), 25);

        let err = QueryParams::parse("filter[price][between]=1", &config)
            .unwrap()
            .into_query(&columns(), &config);
        assert_eq!(err, Err(QueryError::UnknownOperator("between".to_string())));

        let err = QueryParams::parse("sort=price:up", &config)
            .unwrap()
            .into_query(&columns(), &config);
        assert_eq!(err, Err(QueryError::UnknownDirection("up".to_string())));

        let err = QueryParams::parse("page=0", &config)
            .unwrap()
            .into_query(&columns(), &config);
        assert_eq!(err, Err(QueryError::InvalidPage(0)));
    }
}
