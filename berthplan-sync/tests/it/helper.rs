use std::{path::Path, time::Duration};

use async_trait::async_trait;
use berthplan_core::TerminalGeometry;
use berthplan_sync::{
    error::Result,
    oauth::OauthConfig,
    ports::EtcSource,
    settings::{
        ArchiveSettings, BerthPlanApiSettings, Environment, LogLevel, Settings,
        SoapEndpointSettings, TerminalSettings,
    },
    startup::App,
};
use chrono::NaiveDate;
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

pub static ACCESS_TOKEN: &str = "secret-token";
pub static CONSUMER_KEY: &str = "consumer";
pub static BERTH_PLAN_PATH: &str = "/berth-plan";
pub static TOKEN_PATH: &str = "/token";
pub static BERTH_PLAN_SOAP_PATH: &str = "/soap/berth-plan";
pub static ETC_SOAP_PATH: &str = "/soap/etc";
pub static BERTH_PLAN_BASIC_AUTH: &str = "Basic YnAtdXNlcjpicC1wYXNz";
pub static ETC_BASIC_AUTH: &str = "Basic ZXRjLXVzZXI6ZXRjLXBhc3M=";

pub static ETC_FRAGMENT: &str = "<TerminalComercialOperation><header><msgVersion>1.0\
    </msgVersion><sender>APMT</sender></header><body><comercialOperations>\
    <comercialOperation><voyageNumber>512W</voyageNumber><vesselName>MAERSK KOLKATA\
    </vesselName></comercialOperation></comercialOperations></body>\
    </TerminalComercialOperation>";

pub struct TestHelper {
    pub server: MockServer,
    pub archive_dir: TempDir,
    pub settings: Settings,
}

/// Serves a fixed ETC fragment instead of querying the database.
pub struct StaticEtcSource(pub Option<&'static str>);

#[async_trait]
impl EtcSource for StaticEtcSource {
    async fn etc_fragment(&self) -> Result<Option<String>> {
        Ok(self.0.map(|v| v.to_owned()))
    }
}

impl TestHelper {
    pub async fn new() -> TestHelper {
        let server = MockServer::start().await;
        let archive_dir = tempfile::tempdir().unwrap();
        let uri = server.uri();

        let soap = |path: &str, username: &str, password: &str| SoapEndpointSettings {
            url: format!("{uri}{path}"),
            username: username.into(),
            password: password.into(),
            timeout: Duration::from_secs(5),
            accept_invalid_certs: false,
        };

        let settings = Settings {
            log_level: LogLevel::Debug,
            environment: Environment::Test,
            terminal: TerminalSettings {
                code: "MAPTMTM".into(),
                geometry: TerminalGeometry::default(),
                days_back: 8,
                days_ahead: 40,
            },
            berth_plan: BerthPlanApiSettings {
                url: format!("{uri}{BERTH_PLAN_PATH}"),
                consumer_key: CONSUMER_KEY.into(),
                oauth: OauthConfig {
                    client_id: "test-client".into(),
                    client_secret: "test-secret".into(),
                    scope: "api://berth-plan/.default".into(),
                    token_url: format!("{uri}{TOKEN_PATH}"),
                },
                token_expiry_date: None,
                accept_invalid_certs: false,
            },
            berth_plan_delivery: soap(BERTH_PLAN_SOAP_PATH, "bp-user", "bp-pass"),
            etc_delivery: soap(ETC_SOAP_PATH, "etc-user", "etc-pass"),
            etc_database: None,
            archive: ArchiveSettings {
                directory: archive_dir.path().to_string_lossy().into_owned(),
                retention: Duration::from_secs(30 * 24 * 60 * 60),
            },
        };

        TestHelper {
            server,
            archive_dir,
            settings,
        }
    }

    pub fn app(&self) -> App {
        App::build(&self.settings).unwrap()
    }

    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    pub async fn mock_token(&self) {
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": ACCESS_TOKEN,
                "token_type": "Bearer",
                "expires_in": 3599,
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_berth_plan(&self, records: Value) {
        Mock::given(method("GET"))
            .and(path(BERTH_PLAN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(records))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_soap(&self, soap_path: &str, status: u16) {
        Mock::given(method("POST"))
            .and(path(soap_path))
            .respond_with(ResponseTemplate::new(status).set_body_string("<ack/>"))
            .mount(&self.server)
            .await;
    }

    /// Bodies of all requests received on `request_path`.
    pub async fn received(&self, request_path: &str) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap()
            .into_iter()
            .filter(|r| r.url.path() == request_path)
            .map(|r| String::from_utf8(r.body).unwrap())
            .collect()
    }

    /// Sorted file names in the archive directory.
    pub fn archived(&self) -> Vec<String> {
        archived_in(self.archive_dir.path())
    }
}

pub fn archived_in(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return vec![];
    };
    let mut names = entries
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect::<Vec<_>>();
    names.sort();
    names
}

pub fn berth_records() -> Value {
    json!([
        {
            "plannedBollard": "B80.2",
            "vesselLOA": 300,
            "isStarboardBerth": "1",
            "arrivalVoyage": "512W",
            "vesselName": "MAERSK KOLKATA",
            "vesselCode": "MKO",
            "imoCode": "9778832",
            "etb": "2025-06-09T06:00:00",
            "etd": "2025-06-11T18:30:00",
            "etc": "2025-06-11T16:00:00",
            "operatorCode": "MSK",
            "service_Route": "ME2",
            "serviceName": "MECL",
            "plannedLoadMoves": 1200,
            "plannedDischargeMoves": 800,
            "plannedShiftingMoves": 35,
            "averageCranes": 3.5
        },
        {
            "plannedBollard": null,
            "vesselLOA": 180.5,
            "isStarboardBerth": 0,
            "arrivalVoyage": "113N",
            "vesselName": "CMA CGM TANGER",
            "operatorCode": "CMA",
            "etb": "2025-06-14"
        }
    ])
}
