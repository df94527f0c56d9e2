// src/checkout/mod.rs

// Declara o submódulo com as structs do checkout (payload e respostas)
pub mod checkout_structs;
// Declara o submódulo com o escopo transacional que implementa os gateways
pub mod checkout_gateway;
// Declara o submódulo com o serviço que orquestra o checkout
pub mod checkout_service;
// Declara o submódulo com a rota HTTP de checkout
pub mod checkout_router;
