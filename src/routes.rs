use crate::{api::attendance, config::Config};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use anyhow::{Context, Result};

pub type RateLimit = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

/// Per-peer-IP limiter allowing `requests_per_min` with an equal burst.
pub fn build_limiter(requests_per_min: u32) -> Result<RateLimit> {
    let per_ms = if requests_per_min == 0 {
        1
    } else {
        (60_000 / requests_per_min as u64).max(1)
    };

    GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min.max(1))
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .context("Invalid rate limiter configuration")
}

/// `/attendance/{employee_id}/...` resources, without middleware.
pub fn attendance_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/attendance/{employee_id}")
            // /attendance/{employee_id}/clock-in
            .service(web::resource("/clock-in").route(web::post().to(attendance::clock_in)))
            // /attendance/{employee_id}/clock-out
            .service(web::resource("/clock-out").route(web::post().to(attendance::clock_out)))
            // /attendance/{employee_id}/history
            .service(web::resource("/history").route(web::get().to(attendance::history)))
            // /attendance/{employee_id}/today
            .service(web::resource("/today").route(web::get().to(attendance::today))),
    );
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config, limiter: &RateLimit) {
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(Governor::new(limiter)) // rate limiting
            .configure(attendance_routes),
    );
}
