use phishguard::features::extractor::UrlFeatureExtractor;
use phishguard::features::vector::{FEATURE_COUNT, FeatureVector};

#[test]
fn shortener_url_is_flagged_and_otherwise_benign() {
    let extractor = UrlFeatureExtractor::new();
    let vector = extractor.extract("http://bit.ly/abc");

    assert_eq!(vector.uses_shortener, -1);
    assert_eq!(vector.has_ip_address, 1);
    assert_eq!(vector.url_length, -1);
    assert_eq!(vector.has_at_symbol, 1);
    assert_eq!(vector.has_double_slash_redirect, 1);
    assert_eq!(vector.has_prefix_suffix_hyphen, 1);
    assert_eq!(vector.subdomain_complexity, -1);
    assert_eq!(vector.https_in_domain_token, 1);
    assert_eq!(vector.nonstandard_port, 1);
    assert_eq!(vector.submits_to_email, 1);
    assert_eq!(vector.abnormal_structure, 1);
}

#[test]
fn plain_https_url_is_fully_benign() {
    // The "https" literal sits in the scheme, not the hostname, so even the
    // token check comes out benign here.
    let extractor = UrlFeatureExtractor::new();
    let vector = extractor.extract("https://example.com");

    let benign = FeatureVector {
        has_ip_address: 1,
        url_length: -1,
        uses_shortener: 1,
        has_at_symbol: 1,
        has_double_slash_redirect: 1,
        has_prefix_suffix_hyphen: 1,
        subdomain_complexity: -1,
        https_in_domain_token: 1,
        nonstandard_port: 1,
        submits_to_email: 1,
        abnormal_structure: 1,
    };
    assert_eq!(vector, benign);
}

#[test]
fn ip_host_with_at_symbol_flags_both_features() {
    let extractor = UrlFeatureExtractor::new();
    let vector = extractor.extract("http://192.168.1.1/login@evil.com");

    assert_eq!(vector.has_ip_address, -1);
    assert_eq!(vector.has_at_symbol, -1);
}

#[test]
fn extraction_is_total_and_idempotent_over_hostile_input() {
    let extractor = UrlFeatureExtractor::new();
    let mut inputs: Vec<String> = [
        "",
        " ",
        "http://",
        "https://",
        "ftp://",
        "not a url",
        "::::",
        "@@@",
        "http://@/",
        "mailto:user@example.com",
        "http://[invalid",
        "\u{0000}\u{FFFD}",
    ]
    .iter()
    .map(|input| input.to_string())
    .collect();
    inputs.push("a".repeat(10_000));

    for input in &inputs {
        let first = extractor.extract(input);
        let second = extractor.extract(input);
        assert_eq!(first, second, "extraction not idempotent for {input:?}");

        for value in first.to_array() {
            assert!(
                (-1..=1).contains(&value),
                "out-of-domain feature value for {input:?}"
            );
        }
    }
}

#[test]
fn feature_vector_round_trips_through_flat_array() {
    let extractor = UrlFeatureExtractor::new();
    let vector = extractor.extract("http://a.b.c.secure-login.co.uk:8080//redirect@x");

    let array = vector.to_array();
    assert_eq!(array.len(), FEATURE_COUNT);
    assert_eq!(FeatureVector::from_array(array), vector);
}

#[test]
fn deep_suspicious_url_flags_the_expected_features() {
    let extractor = UrlFeatureExtractor::new();
    let vector = extractor.extract("http://a.b.c.secure-login.co.uk:8080/path//login@evil.com");

    assert_eq!(vector.has_prefix_suffix_hyphen, -1); // secure-login
    assert_eq!(vector.subdomain_complexity, 1); // a.b.c
    assert_eq!(vector.nonstandard_port, -1); // 8080
    assert_eq!(vector.has_at_symbol, -1);
    assert_eq!(vector.has_double_slash_redirect, -1);
}
