// src/checkout/checkout_structs.rs

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// Item individual da sacola enviada no checkout.
/// Os nomes de campo no JSON seguem o contrato consumido pelo front.
#[derive(Deserialize, Serialize, Clone)]
pub struct ItemSacola {
    #[serde(rename = "productID")]
    pub produto_id: i32,
    #[serde(rename = "quantity")]
    pub quantidade: i32,
}

/// Corpo da requisição de checkout.
#[derive(Deserialize)]
pub struct CheckoutPayload {
    #[serde(rename = "items")]
    pub itens: Vec<ItemSacola>,
}

/// Resposta de sucesso do checkout.
#[derive(Serialize)]
pub struct CheckoutResponse {
    #[serde(rename = "orderID")]
    pub pedido_id: i32,
    #[serde(rename = "totalPrice")]
    pub total: BigDecimal,
}

/// Resultado interno do serviço de checkout, antes da serialização HTTP.
#[derive(Debug)]
pub struct CheckoutConcluido {
    pub pedido_id: i32,
    pub total: BigDecimal,
}
