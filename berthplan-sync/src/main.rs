use berthplan_sync::{settings::Settings, startup::App};

#[tokio::main]
async fn main() {
    let settings = Settings::new().unwrap();
    settings.init_tracing();

    let app = App::build(&settings).unwrap();

    app.run().await;
}
