use crate::{
    config::RuntimeConfiguration,
    error::{MigrateSnafu, OpenDatabaseSnafu, PersistenceSnafu, RollbookResult},
    gateway::{PgStudentGateway, StudentGateway},
    maud_conveniences::render_nav,
    roster::Roster,
};
use maud::{DOCTYPE, Markup, html};
use snafu::ResultExt;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Clone, Debug)]
pub struct RollbookState {
    gateway: PgStudentGateway,
    config: RuntimeConfiguration,
    roster: Arc<RwLock<Roster>>,
}

impl RollbookState {
    /// Connects, migrates, then seeds the roster with the one server fetch the
    /// app ever does. Everything after this keeps the roster current locally.
    pub async fn new(options: PgPoolOptions, config: RuntimeConfiguration) -> RollbookResult<Self> {
        let pool = options
            .connect(&config.db_config().get_db_path())
            .await
            .context(OpenDatabaseSnafu)?;

        sqlx::migrate!().run(&pool).await.context(MigrateSnafu)?;

        let gateway = PgStudentGateway::new(pool);
        let initial = gateway.list().await.context(PersistenceSnafu)?;
        info!(students = initial.len(), "Roster seeded");

        Ok(Self {
            gateway,
            config,
            roster: Arc::new(RwLock::new(Roster::new(initial))),
        })
    }

    pub const fn gateway(&self) -> &PgStudentGateway {
        &self.gateway
    }

    pub const fn config(&self) -> &RuntimeConfiguration {
        &self.config
    }

    pub async fn roster(&self) -> RwLockReadGuard<'_, Roster> {
        self.roster.read().await
    }

    pub async fn roster_mut(&self) -> RwLockWriteGuard<'_, Roster> {
        self.roster.write().await
    }

    #[allow(clippy::unused_self, clippy::needless_pass_by_value)] //in case self is ever needed :), and to allow direct html! usage
    pub fn render(&self, markup: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="UTF-8" {}
                    meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                    script src="https://unpkg.com/htmx.org@2.0.4" integrity="sha384-HGfztofotfshcF7+8n44JQL2oJmowVChPTg48S+jvZoztPfvwD79OC/LTtG6dMp+" crossorigin="anonymous" {}
                    script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                    title { "Rollbook" }
                }
                body class="bg-gray-900 min-h-screen flex flex-col items-center text-white" {
                    (render_nav())
                    div id="notifications" class="fixed top-4 right-4 z-50 flex flex-col space-y-2" {}
                    (markup)
                }
            }
        }
    }
}
