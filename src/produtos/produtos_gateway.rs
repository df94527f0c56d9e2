// src/produtos/produtos_gateway.rs

use async_trait::async_trait;

use super::produtos_structs::Produto;
use crate::checkout::checkout_gateway::UnidadeCheckout;
use crate::shared::erros::ErroGateway;

/// Capacidade de catálogo consumida pelo serviço de checkout: busca em lote
/// e gravação de estoque. A implementação real roda sobre a transação do
/// checkout; os testes usam uma implementação em memória.
#[async_trait]
pub trait CatalogoGateway {
    /// Busca todos os produtos do conjunto de ids em uma única consulta.
    /// Ids inexistentes simplesmente não aparecem no resultado.
    async fn buscar_por_ids(&mut self, ids: &[i32]) -> Result<Vec<Produto>, ErroGateway>;

    /// Sobrescreve o registro completo do produto pelo id. O chamador passa
    /// a entidade inteira, já com o estoque abatido.
    async fn atualizar_estoque(&mut self, produto: &Produto) -> Result<(), ErroGateway>;
}

#[async_trait]
impl CatalogoGateway for UnidadeCheckout {
    async fn buscar_por_ids(&mut self, ids: &[i32]) -> Result<Vec<Produto>, ErroGateway> {
        // FOR UPDATE trava as linhas até o fim da transação: dois checkouts
        // concorrentes sobre o mesmo produto passam a ser serializados.
        sqlx::query_as::<_, Produto>(
            "SELECT id, nome, descricao, imagem, preco, estoque, criado_em FROM produtos WHERE id = ANY($1) FOR UPDATE"
        )
        .bind(ids)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(ErroGateway::Consulta)
    }

    async fn atualizar_estoque(&mut self, produto: &Produto) -> Result<(), ErroGateway> {
        sqlx::query(
            "UPDATE produtos SET nome = $1, descricao = $2, imagem = $3, preco = $4, estoque = $5 WHERE id = $6"
        )
        .bind(&produto.nome)
        .bind(&produto.descricao)
        .bind(&produto.imagem)
        .bind(&produto.preco)
        .bind(produto.estoque)
        .bind(produto.id)
        .execute(&mut *self.tx)
        .await
        .map_err(ErroGateway::Gravacao)?;

        Ok(())
    }
}
