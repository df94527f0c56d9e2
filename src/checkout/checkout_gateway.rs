// src/checkout/checkout_gateway.rs

use sqlx::{Pool, Postgres, Transaction};

use crate::shared::erros::ErroGateway;

/// Escopo transacional do checkout.
///
/// Um único valor implementa os dois gateways (catálogo e pedidos), de modo
/// que abate de estoque, pedido e itens compartilham a mesma transação: ou
/// tudo é confirmado, ou nada. As implementações dos traits ficam em
/// `produtos_gateway` e `pedidos_gateway`.
pub struct UnidadeCheckout {
    pub(crate) tx: Transaction<'static, Postgres>,
}

impl UnidadeCheckout {
    /// Abre uma transação no pool para um novo checkout.
    pub async fn iniciar(pool: &Pool<Postgres>) -> Result<Self, ErroGateway> {
        let tx = pool.begin().await.map_err(ErroGateway::Consulta)?;
        Ok(UnidadeCheckout { tx })
    }

    /// Confirma todas as gravações deste checkout.
    pub async fn confirmar(self) -> Result<(), ErroGateway> {
        self.tx.commit().await.map_err(ErroGateway::Gravacao)
    }

    /// Desfaz qualquer gravação já feita neste checkout.
    pub async fn desfazer(self) -> Result<(), ErroGateway> {
        self.tx.rollback().await.map_err(ErroGateway::Gravacao)
    }
}
