pub mod department;
pub mod employee;

use serde::Deserialize;

use crate::errors::AppError;

const DEFAULT_PAGE_SIZE: i64 = 20;

/// Raw fetch query parameters shared by the list endpoints. `num` stays
/// a string so a bad value surfaces as a domain constraint error
/// rather than a framework-level deserialization failure.
#[derive(Deserialize)]
pub struct FetchQueryParams {
    pub ids: Option<String>,
    pub keyword: Option<String>,
    pub num: Option<String>,
    pub cursor: Option<String>,
}

#[derive(Debug)]
pub(crate) struct FilterParams {
    pub ids: Vec<String>,
    pub keyword: String,
    pub num: i64,
    pub cursor: String,
}

impl TryFrom<FetchQueryParams> for FilterParams {
    type Error = AppError;

    fn try_from(params: FetchQueryParams) -> Result<Self, AppError> {
        let ids: Vec<String> = params
            .ids
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| s.split(',').map(str::to_string).collect())
            .unwrap_or_default();

        let num = match params.num.as_deref().filter(|s| !s.is_empty()) {
            Some(raw) => raw.parse::<i64>().map_err(|err| {
                AppError::Constraint(format!(
                    "num query-param is not valid. Got error when parsing value: {}",
                    err
                ))
            })?,
            None => DEFAULT_PAGE_SIZE,
        };

        Ok(FilterParams {
            ids,
            keyword: params.keyword.unwrap_or_default(),
            num,
            cursor: params.cursor.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(ids: Option<&str>, num: Option<&str>) -> FetchQueryParams {
        FetchQueryParams {
            ids: ids.map(str::to_string),
            keyword: None,
            num: num.map(str::to_string),
            cursor: None,
        }
    }

    #[test]
    fn num_defaults_to_twenty() {
        let params = FilterParams::try_from(raw(None, None)).unwrap();
        assert_eq!(params.num, 20);
    }

    #[test]
    fn unparseable_num_is_a_constraint_error() {
        let err = FilterParams::try_from(raw(None, Some("lots"))).unwrap_err();
        assert!(matches!(err, AppError::Constraint(_)));
    }

    #[test]
    fn ids_are_split_on_commas() {
        let params = FilterParams::try_from(raw(Some("a,b,c"), None)).unwrap();
        assert_eq!(params.ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_ids_param_keeps_cursor_mode() {
        let params = FilterParams::try_from(raw(Some(""), None)).unwrap();
        assert!(params.ids.is_empty());
    }
}
