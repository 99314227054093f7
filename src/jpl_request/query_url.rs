use url::Url;

use crate::eph_errors::EphError;

/// Append `params` to the query string of `base`.
///
/// Parameters already present in `base` are kept; the new ones follow them after `&`, or
/// start a new query after `?` when `base` has none (a dangling `?` is reused). A fragment
/// stays at the end of the URL. Values are form-encoded. With no `params`, `base` is returned
/// as given; otherwise the URL is re-serialized, so an empty path becomes `/`.
///
/// Arguments
/// ---------
/// * `base`: an absolute URL, possibly with a query
/// * `params`: the pairs to append, in order
///
/// Return
/// ------
/// * the new URL, or [`EphError::InvalidUrl`] when `base` is not an absolute URL.
///
/// Examples
/// --------
/// ```rust
/// use eph::jpl_request::query_url::add_params_to_url;
/// assert_eq!(
///     add_params_to_url("http://xyz.com/q?a=b#top", [("key", "value")]).unwrap(),
///     "http://xyz.com/q?a=b&key=value#top"
/// );
/// ```
pub fn add_params_to_url<I, K, V>(base: &str, params: I) -> Result<String, EphError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut parsed =
        Url::parse(base).map_err(|e| EphError::InvalidUrl(format!("{base}: {e}")))?;

    let params: Vec<(K, V)> = params.into_iter().collect();
    if params.is_empty() {
        return Ok(base.to_string());
    }

    parsed.query_pairs_mut().extend_pairs(params);
    Ok(parsed.into())
}

#[cfg(test)]
mod query_url_test {
    use super::*;

    #[test]
    fn test_add_params_to_url() {
        let cases = [
            ("http://xyz.com", "http://xyz.com/?key=value"),
            ("http://xyz.com?", "http://xyz.com/?key=value"),
            ("http://xyz.com?a=b", "http://xyz.com/?a=b&key=value"),
            ("http://xyz.com/path", "http://xyz.com/path?key=value"),
            ("http://xyz.com/path?a=b", "http://xyz.com/path?a=b&key=value"),
        ];
        for (base, expected) in cases {
            assert_eq!(add_params_to_url(base, [("key", "value")]).unwrap(), expected);
        }
    }

    #[test]
    fn test_fragment_stays_last() {
        let cases = [
            ("http://xyz.com/path#frag", "http://xyz.com/path?key=value#frag"),
            ("http://xyz.com/path?a=b#frag", "http://xyz.com/path?a=b&key=value#frag"),
            ("http://xyz.com/path?#frag", "http://xyz.com/path?key=value#frag"),
        ];
        for (base, expected) in cases {
            assert_eq!(add_params_to_url(base, [("key", "value")]).unwrap(), expected);
        }
    }

    #[test]
    fn test_encoding() {
        let url = add_params_to_url(
            "https://ssd.jpl.nasa.gov/horizons_batch.cgi?batch=1",
            [("CENTER", "@399"), ("START_TIME", "2020-01-01 00:00"), ("TLIST", "'1,2'")],
        )
        .unwrap();
        assert_eq!(
            url,
            "https://ssd.jpl.nasa.gov/horizons_batch.cgi?batch=1&CENTER=%40399&START_TIME=2020-01-01+00%3A00&TLIST=%271%2C2%27"
        );
    }

    #[test]
    fn test_no_params_and_invalid_base() {
        let no_params: [(&str, &str); 0] = [];
        assert_eq!(
            add_params_to_url("http://xyz.com?a=b", no_params).unwrap(),
            "http://xyz.com?a=b"
        );
        assert!(matches!(
            add_params_to_url("not a url", [("key", "value")]),
            Err(EphError::InvalidUrl(_))
        ));
    }
}
