//! Properties of endpoint resolution and invoice list options

use clawprint::models::{InvoiceListOptions, MAX_INVOICE_LIST_LIMIT};
use clawprint::transport::Endpoint;
use proptest::prelude::*;
use reqwest::Url;

proptest! {
    /// The effective limit never exceeds the server maximum and never raises a smaller request.
    #[test]
    fn test_invoice_limit_clamped(limit in any::<u32>()) {
        let options = InvoiceListOptions { status: None, limit: Some(limit) };
        let effective = options.effective_limit().unwrap();
        prop_assert!(effective <= MAX_INVOICE_LIST_LIMIT);
        prop_assert_eq!(effective, limit.min(MAX_INVOICE_LIST_LIMIT));
    }

    /// Any id stays a single path segment under the base path.
    #[test]
    fn test_id_is_one_segment(id in "[a-zA-Z0-9 _/?#%&-]{1,30}") {
        let base = Url::parse("http://localhost:3000/api").unwrap();
        let url = Endpoint::new(["businesses", id.as_str()]).resolve(&base).unwrap();
        let segments: Vec<&str> = url.path_segments().unwrap().collect();
        prop_assert_eq!(segments.len(), 3);
        prop_assert_eq!(segments[0], "api");
        prop_assert_eq!(segments[1], "businesses");
    }

    /// Query values survive encoding.
    #[test]
    fn test_query_values_round_trip(email in "[a-z0-9.+_-]{1,12}@[a-z]{1,8}\\.test") {
        let base = Url::parse("http://localhost:3000/api").unwrap();
        let url = Endpoint::new(["sponsors"]).query("email", email.as_str()).resolve(&base).unwrap();
        let decoded: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        prop_assert_eq!(decoded, vec![("email".to_string(), email)]);
    }
}
