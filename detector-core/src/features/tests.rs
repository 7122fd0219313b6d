//! Integration Tests for URL Feature Extraction
//!
//! Runs the full extractor end to end over representative URLs.

#[cfg(test)]
mod integration_tests {
    use crate::features::{
        extract_features,
        layout::{feature_index, idx, FEATURE_COUNT, PAGE_CONTENT_FEATURES},
        FeatureVector, UrlFeatureExtractor,
    };

    fn feature(vector: &FeatureVector, name: &str) -> f32 {
        feature_index(name)
            .and_then(|i| vector.get(i))
            .unwrap_or_else(|| panic!("unknown feature {}", name))
    }

    #[test]
    fn test_google_is_clean() {
        let v = extract_features("https://www.google.com");

        assert_eq!(feature(&v, "NoHttps"), 0.0);
        assert_eq!(feature(&v, "IpAddress"), 0.0);
        assert_eq!(feature(&v, "NumSensitiveWords"), 0.0);
        assert_eq!(feature(&v, "EmbeddedBrandName"), 1.0);
        assert_eq!(feature(&v, "NumDots"), 2.0);
        assert_eq!(feature(&v, "SubdomainLevel"), 1.0);
        assert_eq!(feature(&v, "UrlLength"), 22.0);
        assert_eq!(feature(&v, "HostnameLength"), 14.0);
        assert_eq!(feature(&v, "PathLength"), 0.0);
        assert_eq!(feature(&v, "PathLevel"), 0.0);
    }

    #[test]
    fn test_brand_lookalike_domain() {
        let v = extract_features("http://paypal-security-update.com.suspicious-domain.tk");

        assert_eq!(feature(&v, "NoHttps"), 1.0);
        assert!(feature(&v, "NumSensitiveWords") >= 1.0);
        assert!(feature(&v, "EmbeddedBrandName") >= 1.0);
        assert_eq!(feature(&v, "NumDashInHostname"), 3.0);
        assert_eq!(feature(&v, "SubdomainLevel"), 2.0);
    }

    #[test]
    fn test_ip_host_with_login_path() {
        let v = extract_features("https://127.0.0.1:8080/login");

        assert_eq!(feature(&v, "IpAddress"), 1.0);
        assert!(feature(&v, "NumSensitiveWords") >= 1.0);
        assert_eq!(feature(&v, "NoHttps"), 0.0);
        assert_eq!(feature(&v, "HostnameLength"), 14.0);
        assert_eq!(feature(&v, "PathLength"), 6.0);
        assert_eq!(feature(&v, "PathLevel"), 1.0);
        assert_eq!(feature(&v, "NumNumericChars"), 10.0);
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        let extraction = UrlFeatureExtractor::new().extract("");
        assert_eq!(extraction.vector, FeatureVector::zeroed());
        assert!(!extraction.is_degraded());
        assert_eq!(extraction.vector.as_slice().len(), FEATURE_COUNT);
    }

    #[test]
    fn test_url_without_scheme_has_no_host_fields() {
        let v = extract_features("www.paypal.com/login");

        assert_eq!(feature(&v, "NoHttps"), 1.0);
        assert_eq!(feature(&v, "HostnameLength"), 0.0);
        assert_eq!(feature(&v, "SubdomainLevel"), 0.0);
        assert_eq!(feature(&v, "PathLength"), 20.0);
        assert_eq!(feature(&v, "PathLevel"), 2.0);
        assert_eq!(feature(&v, "NumDots"), 2.0);
        assert_eq!(feature(&v, "NumSensitiveWords"), 1.0);
        assert_eq!(feature(&v, "EmbeddedBrandName"), 1.0);
    }

    #[test]
    fn test_malformed_percent_encoding_is_not_an_error() {
        let extraction = UrlFeatureExtractor::new().extract("http://example.com/%zz?q=%G1&r=%");

        assert!(!extraction.is_degraded());
        assert_eq!(feature(&extraction.vector, "NumPercent"), 3.0);
        assert_eq!(feature(&extraction.vector, "NumQueryComponents"), 2.0);
        assert_eq!(feature(&extraction.vector, "QueryLength"), 9.0);
    }

    #[test]
    fn test_malformed_authority_degrades_to_zero() {
        let extractor = UrlFeatureExtractor::new();
        assert!(extractor.extract_strict("http://[::1/login").is_err());

        let extraction = extractor.extract("http://[::1/login");
        assert!(extraction.is_degraded());
        assert_eq!(extraction.vector, FeatureVector::zeroed());
    }

    #[test]
    fn test_long_url_sets_runtime_flag() {
        let long = format!("https://example.com/{}", "a".repeat(81));
        assert_eq!(long.len(), 101);
        assert_eq!(feature(&extract_features(&long), "UrlLengthRT"), 1.0);

        let exact = format!("https://example.com/{}", "a".repeat(80));
        assert_eq!(feature(&extract_features(&exact), "UrlLengthRT"), 0.0);
    }

    #[test]
    fn test_runtime_subdomain_copy() {
        let v = extract_features("http://a.b.c.example.org/");
        assert_eq!(feature(&v, "SubdomainLevel"), 3.0);
        assert_eq!(feature(&v, "SubdomainLevelRT"), 3.0);
    }

    #[test]
    fn test_domain_repeated_in_subdomain_and_path() {
        let v = extract_features("http://paypal.com.paypal.com/paypalcompaypalcom//x");
        assert_eq!(feature(&v, "DomainInSubdomains"), 1.0);
        assert_eq!(feature(&v, "DomainInPaths"), 1.0);
        assert_eq!(feature(&v, "DoubleSlashInPath"), 1.0);
    }

    #[test]
    fn test_https_inside_hostname() {
        let v = extract_features("http://https-login.example.net");
        assert_eq!(feature(&v, "HttpsInHostname"), 1.0);
        assert_eq!(feature(&v, "NoHttps"), 1.0);
    }

    #[test]
    fn test_page_content_features_stay_zero() {
        let busy = "http://user@secure-paypal-login.1234abcd.example.com/~a/b//c_d?x=1&y=%41#frag";
        let v = extract_features(busy);

        for name in PAGE_CONTENT_FEATURES {
            assert_eq!(feature(&v, name), 0.0, "{} should be zero", name);
        }
        assert_eq!(v.get(idx::RANDOM_STRING), Some(1.0));
        assert_eq!(v.get(idx::AT_SYMBOL), Some(1.0));
    }

    #[test]
    fn test_any_input_yields_full_vector() {
        let inputs = [
            "",
            " ",
            "not a url",
            "://",
            "http://",
            "http:///path",
            "https://[",
            "https://]",
            "ftp://x;y;z/a;b",
            "javascript:alert(1)",
            "\u{0}\u{1}http://nul.example",
            "http://ünïcødé.example/päth?ké=vål",
            "http://example.com/?a=1&a=2&b&c=&=d",
            "%%%%",
            "#?#?",
        ];

        let extractor = UrlFeatureExtractor::new();
        for input in inputs {
            let extraction = extractor.extract(input);
            assert_eq!(extraction.vector.as_slice().len(), FEATURE_COUNT, "{:?}", input);
            assert!(extraction.vector.validate().is_ok());
        }
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let url = "http://secure-login.bank.example.com/confirm?id=123456789";
        assert_eq!(extract_features(url), extract_features(url));
    }

    #[test]
    fn test_sensitive_and_brand_counts() {
        let v = extract_features("http://signin-account.example.com/webscr?cmd=apple-google-microsoft");
        assert_eq!(feature(&v, "NumSensitiveWords"), 3.0);
        assert_eq!(feature(&v, "EmbeddedBrandName"), 3.0);
        assert_eq!(feature_index("NumSensitiveWords"), Some(idx::NUM_SENSITIVE_WORDS));
    }
}
