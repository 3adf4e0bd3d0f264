pub mod http_client_factory;
pub mod mock;
pub mod prediction_api;

pub use http_client_factory::HttpClientFactory;
pub use prediction_api::HttpPredictionClient;
