// src/checkout/checkout_router.rs

use actix_web::{post, web, HttpResponse};

use super::checkout_gateway::UnidadeCheckout;
use super::checkout_service::ServicoCheckout;
use super::checkout_structs::{CheckoutPayload, CheckoutResponse};
use crate::shared::erros::ErroCheckout;
use crate::usuarios::auth_middleware::AuthenticatedUser;
use crate::AppState;

/// Rota de checkout da sacola.
///
/// O extrator AuthenticatedUser barra requisições sem credencial válida
/// antes de qualquer trabalho; o id do usuário resolvido é repassado
/// explicitamente ao serviço. Toda a orquestração (validação, estoque,
/// total, pedido e itens) roda dentro de uma única transação: confirmada no
/// sucesso, desfeita em qualquer falha.
#[post("/api/v1/cart/checkout")]
pub async fn realizar_checkout(
    data: web::Data<AppState>,
    usuario: AuthenticatedUser,
    payload: web::Json<CheckoutPayload>,
) -> Result<HttpResponse, ErroCheckout> {
    let unidade = UnidadeCheckout::iniciar(&data.db_pool).await?;
    let mut servico = ServicoCheckout::new(unidade);

    match servico.realizar(&payload.itens, usuario.user_id).await {
        Ok(conclusao) => {
            servico.into_inner().confirmar().await?;

            log::info!(
                "Checkout do usuário {} concluído: pedido {}, total {}",
                usuario.user_id,
                conclusao.pedido_id,
                conclusao.total
            );

            Ok(HttpResponse::Ok().json(CheckoutResponse {
                pedido_id: conclusao.pedido_id,
                total: conclusao.total,
            }))
        }
        Err(erro) => {
            // Desfaz qualquer gravação parcial antes de propagar o erro.
            let _ = servico.into_inner().desfazer().await;
            Err(erro)
        }
    }
}
