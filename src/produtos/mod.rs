// src/produtos/mod.rs

// Declara o submódulo com as structs de produto
pub mod produtos_structs;
// Declara o submódulo com o gateway de catálogo consumido pelo checkout
pub mod produtos_gateway;
// Declara o submódulo com as rotas de produto
pub mod produtos_router;
