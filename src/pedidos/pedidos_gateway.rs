// src/pedidos/pedidos_gateway.rs

use async_trait::async_trait;
use sqlx::Row;

use super::pedidos_structs::{ItemPedidoRascunho, PedidoRascunho};
use crate::checkout::checkout_gateway::UnidadeCheckout;
use crate::shared::erros::ErroGateway;

/// Capacidade de registro de pedidos consumida pelo serviço de checkout.
/// Não há contrato de inserção em lote: o serviço chama criar_item_pedido
/// uma vez por linha da sacola.
#[async_trait]
pub trait LivroPedidos {
    /// Insere o pedido e devolve o id gerado pelo banco.
    async fn criar_pedido(&mut self, pedido: &PedidoRascunho) -> Result<i32, ErroGateway>;

    /// Insere uma linha de item do pedido.
    async fn criar_item_pedido(&mut self, item: &ItemPedidoRascunho) -> Result<(), ErroGateway>;
}

#[async_trait]
impl LivroPedidos for UnidadeCheckout {
    async fn criar_pedido(&mut self, pedido: &PedidoRascunho) -> Result<i32, ErroGateway> {
        let row = sqlx::query(
            "INSERT INTO pedidos (usuario_id, total, status, endereco) VALUES ($1, $2, $3, $4) RETURNING id"
        )
        .bind(pedido.usuario_id)
        .bind(&pedido.total)
        .bind(pedido.status.as_str())
        .bind(&pedido.endereco)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(ErroGateway::Gravacao)?;

        row.try_get::<i32, &str>("id").map_err(ErroGateway::Gravacao)
    }

    async fn criar_item_pedido(&mut self, item: &ItemPedidoRascunho) -> Result<(), ErroGateway> {
        sqlx::query(
            "INSERT INTO itens_pedido (pedido_id, produto_id, quantidade, preco) VALUES ($1, $2, $3, $4)"
        )
        .bind(item.pedido_id)
        .bind(item.produto_id)
        .bind(item.quantidade)
        .bind(&item.preco)
        .execute(&mut *self.tx)
        .await
        .map_err(ErroGateway::Gravacao)?;

        Ok(())
    }
}
