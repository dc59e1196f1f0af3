use std::net::TcpListener;

use actix_files::Files;
use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};

use crate::{
    configuration::{ExportSettings, Settings},
    routes::{crawl_route, default_route},
    services::{
        Credentials, DroidLauncher, OpenaiClient, ProfileCrawler, ProfileExtractor,
        ProfileParser, SessionLauncher,
    },
};

pub type LinkedinCrawler = ProfileCrawler<DroidLauncher, ProfileParser<OpenaiClient>>;

pub fn build_crawler(settings: &Settings, credentials: Credentials) -> LinkedinCrawler {
    let openai_client = OpenaiClient::new(&settings.llm);
    let profile_parser = ProfileParser::new(openai_client, settings.llm.model.clone());
    let launcher = DroidLauncher::new(settings.webdriver.engines.clone());

    ProfileCrawler::new(
        launcher,
        profile_parser,
        credentials,
        settings.linkedin.login_url.clone(),
        settings.crawler.clone(),
    )
}

pub fn run<L, E>(
    listener: TcpListener,
    crawler: ProfileCrawler<L, E>,
    export: ExportSettings,
) -> Result<Server, std::io::Error>
where
    L: SessionLauncher + 'static,
    E: ProfileExtractor + 'static,
{
    std::fs::create_dir_all(&export.directory)?;
    let export_directory = export.directory.clone();
    let crawler = web::Data::new(crawler);
    let export = web::Data::new(export);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(default_route::default)
            .service(Files::new("/exports", export_directory.clone()))
            .route("/crawl", web::post().to(crawl_route::crawl_profiles::<L, E>))
            .app_data(crawler.clone())
            .app_data(export.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
