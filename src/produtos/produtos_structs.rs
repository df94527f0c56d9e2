// src/produtos/produtos_structs.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;

/// Estrutura para receber dados do novo produto na requisição POST
#[derive(Deserialize)]
pub struct NovoProduto {
    pub nome: String,
    pub descricao: String,
    pub imagem: String,
    pub preco: BigDecimal,
    pub estoque: i32,
}

/// Estrutura que representa um produto no banco de dados
/// Deriva FromRow para mapeamento direto de resultados de query SQL.
/// Clone é necessário porque o checkout trabalha sobre uma cópia em memória
/// antes de gravar o estoque abatido.
#[derive(Serialize, FromRow, Clone)]
pub struct Produto {
    pub id: i32,
    pub nome: String,
    pub descricao: String,
    pub imagem: String,
    pub preco: BigDecimal,
    pub estoque: i32,
    pub criado_em: NaiveDateTime,
}

/// Estrutura para a resposta da API ao buscar produtos
/// Usada para serializar os dados do produto para JSON
#[derive(Serialize)]
pub struct ProdutoResponse {
    pub id: i32,
    pub nome: String,
    pub descricao: String,
    pub imagem: String,
    pub preco: BigDecimal,
    pub estoque: i32,
}

impl From<Produto> for ProdutoResponse {
    fn from(p: Produto) -> Self {
        ProdutoResponse {
            id: p.id,
            nome: p.nome,
            descricao: p.descricao,
            imagem: p.imagem,
            preco: p.preco,
            estoque: p.estoque,
        }
    }
}
