pub mod campaigns;
pub mod connect;
pub mod create_campaign;
pub mod deploy_factory;
pub mod price;
pub mod session;
