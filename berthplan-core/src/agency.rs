use std::collections::HashMap;

/// Marine agent reported when an operator code has no known agency.
pub static DEFAULT_MARINE_AGENT: &str = "NOA";

static AGENCIES: &[(&str, &str)] = &[
    ("MSK", "NOATUM (Ex MARMEDSA)"),
    ("HCL", "ARKAS MAROC"),
    ("HAP", "ARKAS MAROC"),
    ("MSC", "TRANSPORTS MAROCAINS"),
    ("CGM", "CMA CGM MAROC"),
    ("XCL", "BOLLORE TRANSPORT ET LOGISTICS MAROC"),
    ("JOEL LALAURIE", "JOEL LALAURIE"),
    ("HAMAG", "HAMAG"),
    ("UNIVERSAL SHIPPING", "UNIVERSAL SHIPPING"),
    ("UNION MAIRITIME ET MINIERE", "UNION MAIRITIME ET MINIERE"),
    ("INTERCONA", "INTERCONA"),
    ("GLOBE MARINE", "GLOBE MARINE"),
    ("GRIMALDI AGENCIES MAROC", "GRIMALDI AGENCIES MAROC"),
    ("AGENCE MED", "AGENCE MED"),
    (
        "GLOBAL CONTAINER AGENCY MAROC SA",
        "GLOBAL CONTAINER AGENCY MAROC SA",
    ),
    ("FRS MAROC", "FRS MAROC"),
    ("SOCONAV", "SOCONAV"),
    ("BABMARSA Babord Maroc sarl", "BABMARSA Babord Maroc sarl"),
    ("MARITIME SHIP SERVICES", "MARITIME SHIP SERVICES"),
    ("LASRY MAROC", "LASRY MAROC"),
    ("SAGET MAROC", "SAGET MAROC"),
    ("ASAPS", "ASAPS"),
    ("AGECOMAR", "AGECOMAR"),
    ("SEATRADE", "SEATRADE"),
    ("SHARAF SHIPPING AGENCY", "SHARAF SHIPPING AGENCY"),
    (
        "TRASMEDITERRANEA SHIPPING MAROC",
        "TRASMEDITERRANEA SHIPPING MAROC",
    ),
    ("TB INTERNATIONAL", "TB INTERNATIONAL"),
    ("INTERSHIPPING", "INTERSHIPPING"),
    ("PEREZ & CIA", "PEREZ & CIA"),
    ("GRANDI NAVI VELOCI MAROC", "GRANDI NAVI VELOCI MAROC"),
    ("PLANET COM TRANS", "PLANET COM TRANS"),
    ("OCEAN NETWORK EXPRESS (ONE)", "OCEAN NETWORK EXPRESS (ONE)"),
];

/// Maps vessel operator codes to the display name of their marine agent.
#[derive(Debug, Clone)]
pub struct AgencyDirectory {
    agents: HashMap<String, String>,
}

impl AgencyDirectory {
    pub fn new<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> AgencyDirectory
    where
        K: Into<String>,
        V: Into<String>,
    {
        AgencyDirectory {
            agents: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Operator codes are matched exactly, missing or unknown codes yield [`DEFAULT_MARINE_AGENT`].
    pub fn marine_agent(&self, operator_code: Option<&str>) -> &str {
        operator_code
            .and_then(|code| self.agents.get(code))
            .map(String::as_str)
            .unwrap_or(DEFAULT_MARINE_AGENT)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

impl Default for AgencyDirectory {
    fn default() -> Self {
        Self::new(AGENCIES.iter().copied())
    }
}
