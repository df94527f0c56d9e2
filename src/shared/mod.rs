// src/shared/mod.rs

// Declara o submódulo com a resposta genérica da API
pub mod shared_structs;
// Declara o submódulo com os erros do checkout e do armazenamento
pub mod erros;
