mod config_tags;
mod count;
mod halting;
mod simple;
mod statements;
mod times;
mod transaction1;

use crate::{
    config_tags::config_tags, count::count, halting::halting, simple::simple,
    statements::statements, times::times,
};
use log::LevelFilter;
use std::env;
use tack::{Connection, Database};
#[cfg(not(feature = "disable-transactions"))]
use transaction1::transaction1;

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

pub async fn execute_tests<C: Connection>(database: Database<C>) {
    simple(&database).await;
    config_tags(&database).await;
    count(&database).await;
    halting(&database).await;
    statements(&database).await;
    times(&database).await;
    #[cfg(not(feature = "disable-transactions"))]
    transaction1(&database).await;
}

#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        $($code)+
        log::set_max_level(level);
    }};
}
