lazy_static! {
    static ref TIERS: Vec<(&'static str, EnvironmentMap)> = vec![
        (
            "prod",
            EnvironmentMap::new(Some("commerce.adobe.com"), Some("express.adobe.com")),
        ),
        (
            "stage",
            EnvironmentMap::new(
                Some("commerce-stg.adobe.com"),
                Some("stage.projectx.corp.adobe.com"),
            ),
        ),
    ];
}

/// Physical hostnames for the logical `commerce` and `spark` hosts of the
/// current deployment tier. An empty map means no remapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvironmentMap {
    commerce: Option<String>,
    spark: Option<String>,
}

impl EnvironmentMap {
    pub fn new(commerce: Option<&str>, spark: Option<&str>) -> Self {
        Self {
            commerce: commerce.map(|s| s.to_string()),
            spark: spark.map(|s| s.to_string()),
        }
    }

    /// Map for a named tier; unknown or absent tiers map nothing.
    pub fn for_tier(tier: Option<&str>) -> Self {
        let Some(tier) = tier else {
            return Self::default();
        };
        match TIERS.iter().find(|(name, _)| name.eq_ignore_ascii_case(tier)) {
            Some((_, map)) => map.to_owned(),
            None => {
                tracing::warn!("unknown environment tier '{tier}', no host remapping");
                Self::default()
            }
        }
    }

    /// Layers individual hostname overrides over this map.
    pub fn with_overrides(mut self, commerce: Option<String>, spark: Option<String>) -> Self {
        if commerce.is_some() {
            self.commerce = commerce;
        }
        if spark.is_some() {
            self.spark = spark;
        }
        self
    }

    pub fn commerce(&self) -> Option<&str> {
        self.commerce.as_deref().filter(|s| !s.is_empty())
    }

    pub fn spark(&self) -> Option<&str> {
        self.spark.as_deref().filter(|s| !s.is_empty())
    }
}
