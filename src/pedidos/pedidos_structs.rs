// src/pedidos/pedidos_structs.rs

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// Situação de um pedido. O checkout grava sempre 'pendente'; os demais
/// estados pertencem ao acompanhamento posterior do pedido.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusPedido {
    Pendente,
    Pago,
    Enviado,
    Cancelado,
}

impl StatusPedido {
    /// Texto gravado na coluna 'status' da tabela de pedidos.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusPedido::Pendente => "pendente",
            StatusPedido::Pago => "pago",
            StatusPedido::Enviado => "enviado",
            StatusPedido::Cancelado => "cancelado",
        }
    }
}

/// Dados de um novo pedido, ainda sem o id gerado pelo banco.
/// Depois de criado, o pedido não é alterado por este fluxo.
#[derive(Debug, Clone)]
pub struct PedidoRascunho {
    pub usuario_id: i32,
    pub total: BigDecimal,
    pub status: StatusPedido,
    pub endereco: String,
}

/// Dados de uma linha de item de pedido, uma por item da sacola.
/// 'preco' é o preço do catálogo capturado no momento do checkout; mudanças
/// futuras de preço não afetam pedidos já fechados.
#[derive(Debug, Clone)]
pub struct ItemPedidoRascunho {
    pub pedido_id: i32,
    pub produto_id: i32,
    pub quantidade: i32,
    pub preco: BigDecimal,
}
