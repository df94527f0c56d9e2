// src/produtos/produtos_router.rs

use actix_web::{get, post, web, HttpResponse, Responder};
use sqlx::{query_as, Row};
use serde_json;

// Importa as structs definidas no módulo `produtos_structs` dentro da mesma pasta `produtos`
use super::produtos_structs::{NovoProduto, Produto, ProdutoResponse};
// Importa o extrator de autenticação: cadastrar produto exige credencial válida
use crate::usuarios::auth_middleware::AuthenticatedUser;
// Importa GenericResponse do módulo shared_structs
use crate::shared::shared_structs::GenericResponse;
// Importa o AppState do módulo raiz (main.rs)
use crate::AppState;

/// Rota para buscar todos os produtos no banco de dados.
///
/// Executa a consulta na tabela 'produtos' e mapeia cada linha para
/// `ProdutoResponse` antes da serialização JSON.
#[get("/api/v1/produtos")]
pub async fn listar_produtos(data: web::Data<AppState>) -> impl Responder {
    let produtos_result = query_as::<_, Produto>(
        "SELECT id, nome, descricao, imagem, preco, estoque, criado_em FROM produtos",
    )
    .fetch_all(&data.db_pool)
    .await;

    match produtos_result {
        Ok(produtos) => {
            let response: Vec<ProdutoResponse> =
                produtos.into_iter().map(ProdutoResponse::from).collect();

            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            log::error!("Erro ao buscar produtos: {:?}", e);
            HttpResponse::InternalServerError()
                .json(GenericResponse::<()>::erro("Erro ao buscar produtos."))
        }
    }
}

/// Rota para buscar um produto pelo id.
#[get("/api/v1/produtos/{id}")]
pub async fn buscar_produto_por_id(
    data: web::Data<AppState>,
    path: web::Path<i32>,
) -> HttpResponse {
    let produto_id = path.into_inner();

    let produto_result = query_as::<_, Produto>(
        "SELECT id, nome, descricao, imagem, preco, estoque, criado_em FROM produtos WHERE id = $1",
    )
    .bind(produto_id)
    .fetch_optional(&data.db_pool)
    .await;

    match produto_result {
        Ok(Some(produto)) => HttpResponse::Ok().json(ProdutoResponse::from(produto)),
        Ok(None) => HttpResponse::NotFound().json(GenericResponse::<()>::erro(&format!(
            "Produto com ID {} não encontrado.",
            produto_id
        ))),
        Err(e) => {
            log::error!("Erro ao buscar produto {}: {:?}", produto_id, e);
            HttpResponse::InternalServerError()
                .json(GenericResponse::<()>::erro("Erro ao buscar produto."))
        }
    }
}

/// Rota para inserir um novo produto no banco de dados.
///
/// Recebe os dados do novo produto via JSON no corpo da requisição e exige
/// um usuário autenticado. Insere o produto na tabela 'produtos' e retorna
/// o ID gerado.
#[post("/api/v1/produtos")]
pub async fn cadastrar_produto(
    data: web::Data<AppState>,
    usuario: AuthenticatedUser,
    item: web::Json<NovoProduto>, // O corpo da requisição JSON é desserializado para NovoProduto
) -> HttpResponse {
    let result = sqlx::query(
        "INSERT INTO produtos (nome, descricao, imagem, preco, estoque) VALUES ($1, $2, $3, $4, $5) RETURNING id"
    )
    .bind(&item.nome)
    .bind(&item.descricao)
    .bind(&item.imagem)
    .bind(&item.preco)     // Preço do produto (BigDecimal)
    .bind(item.estoque)
    .fetch_one(&data.db_pool)
    .await;

    match result {
        Ok(row) => match row.try_get::<i32, &str>("id") {
            Ok(id) => {
                log::info!("Produto {} cadastrado pelo usuário {}", id, usuario.user_id);
                HttpResponse::Ok().json(serde_json::json!({ "id": id }))
            }
            Err(e) => {
                log::error!("Erro ao obter id do novo produto: {:?}", e);
                HttpResponse::InternalServerError()
                    .json(GenericResponse::<()>::erro("Erro ao processar resposta."))
            }
        },
        Err(e) => {
            log::error!("Erro ao inserir produto: {:?}", e);
            HttpResponse::InternalServerError()
                .json(GenericResponse::<()>::erro("Erro ao inserir produto."))
        }
    }
}
