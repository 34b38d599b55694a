use async_trait::async_trait;
use snafu::ResultExt;
use tiberius::{AuthMethod, Client, Config};
use tokio::net::TcpStream;
use tokio_util::compat::TokioAsyncWriteCompatExt;
use tracing::{info, instrument, warn};

use crate::{
    error::{
        Result,
        error::{ConnectSnafu, DatabaseSnafu},
    },
    ports::EtcSource,
    settings::EtcDatabaseSettings,
};

/// Renders one `comercialOperation` per carrier visit in the `40WORKING` phase that still has
/// uncompleted load or discharge work instructions.
static ETC_QUERY: &str = r#"
WITH cte AS (
    SELECT a.est_move_time, b.id, lloyds_id, name
    FROM Sparcsn4.dbo.inv_wi a
    INNER JOIN Sparcsn4.dbo.argo_carrier_visit b ON a.carrier_locid = b.id
    LEFT OUTER JOIN argo_visit_details c ON c.gkey = b.cvcvd_gkey
    LEFT OUTER JOIN vsl_vessel_visit_details d ON d.vvd_gkey = c.gkey
    LEFT OUTER JOIN vsl_vessels e ON e.gkey = d.vessel_gkey
    WHERE a.move_kind IN ('LOAD', 'DSCH')
    AND a.move_stage NOT LIKE '%COMPLETE%'
    AND b.phase = '40WORKING'
)
SELECT (
    SELECT '1.0' AS msgVersion,
        CONVERT(varchar, GETDATE(), 126) + DATENAME(tz, SYSDATETIMEOFFSET()) AS GenerationTime,
        'APMT' AS sender,
        'TerminalComercialOperationETC' AS msgFunction
    FOR XML PATH('header'), TYPE
), (
    SELECT RIGHT(id, LEN(id) - 3) AS voyageNumber,
        name AS vesselName,
        LEFT(id, 3) AS vesselCode,
        lloyds_id AS IMO,
        MAX(CONVERT(varchar, est_move_time, 126) + '.000' + DATENAME(tz, SYSDATETIMEOFFSET())) AS ETC
    FROM cte
    GROUP BY id, lloyds_id, name
    FOR XML PATH('comercialOperation'), TYPE, ELEMENTS
) AS 'body/comercialOperations'
FOR XML PATH(''), ROOT('TerminalComercialOperation');
"#;

/// Reads the ETC fragment from the terminal operating system's SQL Server database.
///
/// A new connection is opened for every fetch and closed afterwards.
pub struct SqlServerEtcSource {
    settings: EtcDatabaseSettings,
}

impl SqlServerEtcSource {
    pub fn new(settings: EtcDatabaseSettings) -> SqlServerEtcSource {
        SqlServerEtcSource { settings }
    }

    fn config(&self) -> Config {
        let mut config = Config::new();
        config.host(&self.settings.host);
        config.port(self.settings.port);
        config.database(&self.settings.database);
        config.authentication(AuthMethod::sql_server(
            &self.settings.username,
            &self.settings.password,
        ));
        if self.settings.trust_cert {
            config.trust_cert();
        }
        config
    }
}

#[async_trait]
impl EtcSource for SqlServerEtcSource {
    #[instrument(skip_all, fields(app.host = %self.settings.host, app.database = %self.settings.database))]
    async fn etc_fragment(&self) -> Result<Option<String>> {
        let address = self.settings.address();
        let tcp = TcpStream::connect(&address).await.context(ConnectSnafu {
            address: &address,
        })?;
        tcp.set_nodelay(true).context(ConnectSnafu { address })?;

        let mut client = Client::connect(self.config(), tcp.compat_write())
            .await
            .context(DatabaseSnafu)?;

        let rows = client
            .simple_query(ETC_QUERY)
            .await
            .context(DatabaseSnafu)?
            .into_first_result()
            .await
            .context(DatabaseSnafu)?;

        // Large `FOR XML` results are split over several rows.
        let mut fragment = String::new();
        for row in &rows {
            if let Some(chunk) = row.try_get::<&str, _>(0).context(DatabaseSnafu)? {
                fragment.push_str(chunk);
            }
        }

        client.close().await.context(DatabaseSnafu)?;

        if fragment.trim().is_empty() {
            warn!("etc query returned no data");
            return Ok(None);
        }

        info!(app.num_rows = rows.len(), "fetched etc fragment");
        Ok(Some(fragment))
    }
}
