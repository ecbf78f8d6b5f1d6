
pub mod app;
pub mod data_layer_error;
pub mod settings;

pub mod background_svcs {
    pub mod reward_ledger_svc;
}

pub mod middleware {
    pub mod auth_middleware;
    pub mod validation;
}

pub mod models {
    pub mod api_models;
}

pub mod routes {
    pub mod auth_routes;
    pub mod quest_routes;
    pub mod wallet_routes;
}

pub mod resources {
    pub mod quest_resources;
}

pub mod services {
    pub mod auth_service;
    pub mod quest_service;
    pub mod token_service;
    pub mod wallet_service;
}
