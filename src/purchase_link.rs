use crate::environment::EnvironmentMap;
use crate::error::Result;
use crate::host_rule::HostRule;
use crate::page_context::PageContext;
use crate::url_params;

/// Page parameters copied onto the return URL when present.
pub const FORWARDED_TRACKING_PARAMS: &[&str] = &["touchpointName", "destinationUrl", "srcUrl"];

/// Rewrites checkout links for the current page and deployment tier.
#[derive(Debug, Clone, Copy)]
pub struct PurchaseLinkBuilder<'a> {
    page: &'a PageContext,
    env: &'a EnvironmentMap,
}

impl<'a> PurchaseLinkBuilder<'a> {
    pub fn new(page: &'a PageContext, env: &'a EnvironmentMap) -> Self {
        Self { page, env }
    }

    /// Produces the checkout href for `option_url` in the given locale.
    ///
    /// Links whose hostname does not contain `commerce` come back verbatim.
    /// Otherwise `co`/`lang` are set, the hostname and return URL (`rUrl`) are
    /// remapped for the page's `host` parameter and the environment, tracking
    /// parameters and `code` are forwarded from the page, and a non-empty
    /// `rUrl` on the page replaces the computed return URL outright.
    pub fn build_url(&self, option_url: &str, country: &str, language: &str) -> Result<String> {
        let mut plan_url = url_params::parse(option_url)?;
        if !plan_url.host_str().unwrap_or_default().contains("commerce") {
            return Ok(option_url.to_string());
        }

        url_params::set(&mut plan_url, "co", country);
        url_params::set(&mut plan_url, "lang", language);
        let mut r_url = url_params::get(&plan_url, "rUrl").filter(|r| !r.is_empty());

        if let Some(page_host) = self.page.param("host") {
            if let Some(rule) = HostRule::first_match(&page_host) {
                url_params::set_hostname(&mut plan_url, rule.hostname())?;
                r_url = r_url.map(|r| rule.rewrite_return_url(&r, &page_host));
            }
        }

        if let Some(commerce) = self.env.commerce() {
            if plan_url.host_str().unwrap_or_default().contains("commerce") {
                url_params::set_hostname(&mut plan_url, commerce)?;
            }
        }
        if let Some(spark) = self.env.spark() {
            r_url = r_url.map(|r| Self::with_hostname(&r, spark)).transpose()?;
        }
        r_url = r_url
            .map(|r| self.forward_tracking_params(&r))
            .transpose()?;

        if let Some(code) = self.page.param("code") {
            url_params::set(&mut plan_url, "code", &code);
        }

        // An explicit rUrl on the page wins over everything derived above.
        if let Some(page_r_url) = self.page.param("rUrl").filter(|r| !r.is_empty()) {
            tracing::debug!("page rUrl overrides computed return url");
            r_url = Some(page_r_url);
        }

        if let Some(r) = r_url {
            url_params::set(&mut plan_url, "rUrl", &r);
        }
        Ok(plan_url.to_string())
    }

    fn with_hostname(r_url: &str, host: &str) -> Result<String> {
        let mut url = url_params::parse(r_url)?;
        url_params::set_hostname(&mut url, host)?;
        Ok(url.to_string())
    }

    fn forward_tracking_params(&self, r_url: &str) -> Result<String> {
        let mut url = url_params::parse(r_url)?;
        for name in FORWARDED_TRACKING_PARAMS {
            if let Some(value) = self.page.param(name) {
                url_params::set(&mut url, name, &value);
            }
        }
        Ok(url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PricingError;
    use url::Url;

    const STORE: &str =
        "https://commerce.adobe.com/store?items[0][id]=abc&rUrl=https://spark.adobe.com/done";

    fn build(page: &str, env: &EnvironmentMap, option_url: &str) -> Result<String> {
        let page = PageContext::new(page).unwrap();
        PurchaseLinkBuilder::new(&page, env).build_url(option_url, "fr", "fr-FR")
    }

    fn param(url: &str, name: &str) -> Option<String> {
        url_params::get(&Url::parse(url).unwrap(), name)
    }

    fn host(url: &str) -> String {
        Url::parse(url).unwrap().host_str().unwrap().to_string()
    }

    #[test]
    fn test_non_commerce_passes_through() {
        let page = PageContext::new("https://www.adobe.com/express/").unwrap();
        let env = EnvironmentMap::for_tier(Some("prod"));
        let builder = PurchaseLinkBuilder::new(&page, &env);
        assert_eq!(
            builder.build_url("https://other.example.com/x", "us", "en").unwrap(),
            "https://other.example.com/x"
        );
        assert_eq!(
            builder.build_url("https://other.example.com", "us", "en").unwrap(),
            "https://other.example.com"
        );
    }

    #[test]
    fn test_plain_commerce_url() {
        let out = build("https://www.adobe.com/express/", &EnvironmentMap::default(), STORE).unwrap();
        assert_eq!(host(&out), "commerce.adobe.com");
        assert_eq!(param(&out, "co"), Some("fr".to_string()));
        assert_eq!(param(&out, "lang"), Some("fr-FR".to_string()));
        assert_eq!(param(&out, "items[0][id]"), Some("abc".to_string()));
        assert_eq!(param(&out, "rUrl"), Some("https://spark.adobe.com/done".to_string()));
    }

    #[test]
    fn test_existing_locale_params_are_overwritten() {
        let out = build(
            "https://www.adobe.com/express/",
            &EnvironmentMap::default(),
            "https://commerce.adobe.com/store?co=us&lang=en",
        )
        .unwrap();
        assert_eq!(param(&out, "co"), Some("fr".to_string()));
        assert_eq!(param(&out, "lang"), Some("fr-FR".to_string()));
        assert_eq!(out.matches("co=").count(), 1);
    }

    #[test]
    fn test_spark_host() {
        let out = build(
            "https://www.adobe.com/express/?host=spark.adobe.com",
            &EnvironmentMap::default(),
            "https://commerce-stg.adobe.com/store?items[0][id]=abc",
        )
        .unwrap();
        assert_eq!(host(&out), "commerce.adobe.com");
        assert_eq!(param(&out, "rUrl"), None);
    }

    #[test]
    fn test_qa_host() {
        let out = build(
            "https://www.adobe.com/express/?host=foo.qa.adobeprojectm.com",
            &EnvironmentMap::default(),
            STORE,
        )
        .unwrap();
        assert_eq!(host(&out), "commerce.adobe.com");
        assert_eq!(
            param(&out, "rUrl"),
            Some("https://foo.qa.adobeprojectm.com/done".to_string())
        );
    }

    #[test]
    fn test_stage_host() {
        let out = build(
            "https://www.adobe.com/express/?host=foo.adobeprojectm.com",
            &EnvironmentMap::default(),
            "https://commerce.adobe.com/store?rUrl=https%3A%2F%2Fadminconsole.adobe.com%2Fback%3Fto%3Dspark.adobe.com",
        )
        .unwrap();
        assert_eq!(host(&out), "commerce-stg.adobe.com");
        assert_eq!(
            param(&out, "rUrl"),
            Some("https://stage.adminconsole.adobe.com/back?to=foo.adobeprojectm.com".to_string())
        );
    }

    #[test]
    fn test_unmatched_host_param_changes_nothing() {
        let out = build(
            "https://www.adobe.com/express/?host=www.adobe.com",
            &EnvironmentMap::default(),
            STORE,
        )
        .unwrap();
        assert_eq!(host(&out), "commerce.adobe.com");
        assert_eq!(param(&out, "rUrl"), Some("https://spark.adobe.com/done".to_string()));
    }

    #[test]
    fn test_environment_override() {
        let env = EnvironmentMap::for_tier(Some("stage"));
        let out = build("https://www.adobe.com/express/", &env, STORE).unwrap();
        assert_eq!(host(&out), "commerce-stg.adobe.com");
        assert_eq!(
            param(&out, "rUrl"),
            Some("https://stage.projectx.corp.adobe.com/done".to_string())
        );
    }

    #[test]
    fn test_environment_applies_after_host_rule() {
        let env = EnvironmentMap::new(Some("commerce-dev.adobe.com"), None);
        let out = build(
            "https://www.adobe.com/express/?host=foo.adobeprojectm.com",
            &env,
            STORE,
        )
        .unwrap();
        assert_eq!(host(&out), "commerce-dev.adobe.com");
    }

    #[test]
    fn test_tracking_params_forwarded_to_return_url() {
        let out = build(
            "https://www.adobe.com/express/?touchpointName=tp&srcUrl=https%3A%2F%2Fsrc.test%2F",
            &EnvironmentMap::default(),
            "https://commerce.adobe.com/store?rUrl=https%3A%2F%2Fspark.adobe.com%2Fdone%3FtouchpointName%3Dold",
        )
        .unwrap();
        let r_url = param(&out, "rUrl").unwrap();
        assert_eq!(param(&r_url, "touchpointName"), Some("tp".to_string()));
        assert_eq!(param(&r_url, "srcUrl"), Some("https://src.test/".to_string()));
        assert_eq!(param(&r_url, "destinationUrl"), None);
    }

    #[test]
    fn test_tracking_params_ignored_without_return_url() {
        let out = build(
            "https://www.adobe.com/express/?touchpointName=tp",
            &EnvironmentMap::default(),
            "https://commerce.adobe.com/store",
        )
        .unwrap();
        assert_eq!(param(&out, "rUrl"), None);
        assert_eq!(param(&out, "touchpointName"), None);
    }

    #[test]
    fn test_code_forwarded() {
        let out = build(
            "https://www.adobe.com/express/?code=PROMO",
            &EnvironmentMap::default(),
            "https://commerce.adobe.com/store?code=OLD",
        )
        .unwrap();
        assert_eq!(param(&out, "code"), Some("PROMO".to_string()));
    }

    #[test]
    fn test_page_return_url_wins() {
        let env = EnvironmentMap::for_tier(Some("stage"));
        let out = build(
            "https://www.adobe.com/express/?host=foo.adobeprojectm.com&touchpointName=tp&rUrl=https%3A%2F%2Fexample.com%2Fx",
            &env,
            STORE,
        )
        .unwrap();
        assert_eq!(param(&out, "rUrl"), Some("https://example.com/x".to_string()));
    }

    #[test]
    fn test_empty_page_return_url_is_ignored() {
        let out = build(
            "https://www.adobe.com/express/?rUrl=",
            &EnvironmentMap::default(),
            STORE,
        )
        .unwrap();
        assert_eq!(param(&out, "rUrl"), Some("https://spark.adobe.com/done".to_string()));
    }

    #[test]
    fn test_page_return_url_added_when_candidate_has_none() {
        let out = build(
            "https://www.adobe.com/express/?rUrl=https%3A%2F%2Fexample.com%2Fx",
            &EnvironmentMap::default(),
            "https://commerce.adobe.com/store",
        )
        .unwrap();
        assert_eq!(param(&out, "rUrl"), Some("https://example.com/x".to_string()));
    }

    #[test]
    fn test_empty_candidate_return_url_is_left_alone() {
        let env = EnvironmentMap::for_tier(Some("stage"));
        let out = build(
            "https://www.adobe.com/express/?touchpointName=tp",
            &env,
            "https://commerce.adobe.com/store?rUrl=",
        )
        .unwrap();
        assert_eq!(param(&out, "rUrl"), Some(String::new()));
    }

    #[test]
    fn test_inputs_not_mutated() {
        let page = PageContext::new("https://www.adobe.com/express/?host=spark.adobe.com").unwrap();
        let env = EnvironmentMap::for_tier(Some("stage"));
        let builder = PurchaseLinkBuilder::new(&page, &env);
        let first = builder.build_url(STORE, "fr", "fr-FR").unwrap();
        let second = builder.build_url(STORE, "fr", "fr-FR").unwrap();
        assert_eq!(first, second);
        assert_eq!(page.param("host"), Some("spark.adobe.com".to_string()));
        assert_eq!(env, EnvironmentMap::for_tier(Some("stage")));
    }

    #[test]
    fn test_unassignable_commerce_host() {
        let env = EnvironmentMap::new(Some("bad host"), None);
        let err = build("https://www.adobe.com/", &env, STORE).unwrap_err();
        assert!(matches!(err, PricingError::InvalidHost { .. }));
    }

    #[test]
    fn test_unassignable_spark_host() {
        let env = EnvironmentMap::new(None, Some("bad host"));
        let err = build("https://www.adobe.com/", &env, STORE).unwrap_err();
        assert!(matches!(err, PricingError::InvalidHost { .. }));
    }

    #[test]
    fn test_environment_host_with_port_is_rejected() {
        let env = EnvironmentMap::new(None, Some("localhost:3000"));
        let err = build("https://www.adobe.com/", &env, STORE).unwrap_err();
        assert!(matches!(err, PricingError::InvalidHost { .. }));
        let env = EnvironmentMap::new(Some("localhost:3000"), None);
        let err = build("https://www.adobe.com/", &env, STORE).unwrap_err();
        assert!(matches!(err, PricingError::InvalidHost { .. }));
    }

    #[test]
    fn test_malformed_option_url() {
        let err = build("https://www.adobe.com/", &EnvironmentMap::default(), "commerce").unwrap_err();
        assert!(matches!(err, PricingError::InvalidUrl { .. }));
    }

    #[test]
    fn test_malformed_return_url() {
        let err = build(
            "https://www.adobe.com/",
            &EnvironmentMap::default(),
            "https://commerce.adobe.com/store?rUrl=not-a-url",
        )
        .unwrap_err();
        assert!(matches!(err, PricingError::InvalidUrl { .. }));
    }
}
