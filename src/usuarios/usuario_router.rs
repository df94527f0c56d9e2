// src/usuarios/usuario_router.rs

use actix_web::{post, web, HttpResponse};
use bcrypt::{hash, verify, DEFAULT_COST}; // Para hashing de senhas
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json;
use sqlx::{query, query_as, Row};

// Importa as structs do módulo de usuários
use super::usuario_structs::{AuthResponse, Claims, LoginRequest, NovoUsuario, Usuario};
// Importa GenericResponse do módulo shared_structs
use crate::shared::shared_structs::GenericResponse;
// Importa o AppState do módulo raiz (main.rs)
use crate::AppState;

// Validade do token emitido no login.
const VALIDADE_TOKEN_HORAS: i64 = 24;

/// Rota para cadastrar um novo usuário.
#[post("/api/v1/usuarios/cadastro")]
pub async fn cadastrar_usuario(
    data: web::Data<AppState>,
    novo_usuario: web::Json<NovoUsuario>,
) -> HttpResponse {
    // 1. Verificar se o e-mail já está em uso
    let existing_user =
        query_as::<_, Usuario>("SELECT id, nome, email, senha_hash FROM usuarios WHERE email = $1")
            .bind(&novo_usuario.email)
            .fetch_optional(&data.db_pool)
            .await;

    match existing_user {
        Ok(Some(_)) => {
            return HttpResponse::BadRequest()
                .json(GenericResponse::<()>::erro("E-mail já cadastrado."));
        }
        Err(e) => {
            log::error!("Erro ao verificar e-mail existente: {:?}", e);
            return HttpResponse::InternalServerError()
                .json(GenericResponse::<()>::erro("Erro interno ao verificar e-mail."));
        }
        _ => {} // E-mail não encontrado, pode prosseguir
    }

    // 2. Hash da senha
    let hashed_password = match hash(&novo_usuario.senha, DEFAULT_COST) {
        Ok(h) => h,
        Err(e) => {
            log::error!("Erro ao fazer hash da senha: {:?}", e);
            return HttpResponse::InternalServerError()
                .json(GenericResponse::<()>::erro("Erro interno ao processar senha."));
        }
    };

    // 3. Inserir o novo usuário no banco de dados
    let result = query("INSERT INTO usuarios (nome, email, senha_hash) VALUES ($1, $2, $3) RETURNING id")
        .bind(&novo_usuario.nome)
        .bind(&novo_usuario.email)
        .bind(&hashed_password)
        .fetch_one(&data.db_pool)
        .await;

    match result {
        Ok(row) => match row.try_get::<i32, &str>("id") {
            Ok(id) => {
                log::info!("Usuário {} cadastrado.", id);
                HttpResponse::Ok().json(GenericResponse::sucesso(
                    "Usuário cadastrado com sucesso!",
                    serde_json::json!({ "id": id }),
                ))
            }
            Err(e) => {
                log::error!("Erro ao obter id do novo usuário: {:?}", e);
                HttpResponse::InternalServerError().json(GenericResponse::<()>::erro(
                    "Erro ao processar resposta do cadastro do usuário.",
                ))
            }
        },
        Err(e) => {
            log::error!("Erro ao inserir usuário: {:?}", e);
            HttpResponse::InternalServerError()
                .json(GenericResponse::<()>::erro("Erro ao inserir usuário."))
        }
    }
}

/// Rota para login de usuário. Emite um JWT HS256 com a mesma chave usada
/// pelo extrator de autenticação.
#[post("/api/v1/usuarios/login")]
pub async fn login_usuario(
    data: web::Data<AppState>,
    login_request: web::Json<LoginRequest>,
) -> HttpResponse {
    // 1. Buscar o usuário pelo e-mail
    let user_result =
        query_as::<_, Usuario>("SELECT id, nome, email, senha_hash FROM usuarios WHERE email = $1")
            .bind(&login_request.email)
            .fetch_optional(&data.db_pool)
            .await;

    let user = match user_result {
        Ok(Some(u)) => u,
        Ok(None) => {
            return HttpResponse::Unauthorized()
                .json(GenericResponse::<()>::erro("Credenciais inválidas."));
        }
        Err(e) => {
            log::error!("Erro ao buscar usuário para login: {:?}", e);
            return HttpResponse::InternalServerError()
                .json(GenericResponse::<()>::erro("Erro interno ao processar login."));
        }
    };

    // 2. Verificar a senha
    let password_matches = match verify(&login_request.senha, &user.senha_hash) {
        Ok(matches) => matches,
        Err(e) => {
            log::error!("Erro ao verificar senha: {:?}", e);
            return HttpResponse::InternalServerError()
                .json(GenericResponse::<()>::erro("Erro interno ao verificar senha."));
        }
    };

    if !password_matches {
        return HttpResponse::Unauthorized()
            .json(GenericResponse::<()>::erro("Credenciais inválidas."));
    }

    // 3. Gerar o token JWT assinado com a chave da aplicação
    let expira_em = Utc::now() + Duration::hours(VALIDADE_TOKEN_HORAS);
    let claims = Claims {
        sub: user.id,
        name: user.nome.clone(),
        email: user.email.clone(),
        exp: expira_em.timestamp(),
    };

    let token = match encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(data.jwt_secret.as_ref()),
    ) {
        Ok(t) => t,
        Err(e) => {
            log::error!("Erro ao assinar JWT: {:?}", e);
            return HttpResponse::InternalServerError()
                .json(GenericResponse::<()>::erro("Erro interno ao gerar token."));
        }
    };

    // 4. Retornar resposta de sucesso
    HttpResponse::Ok().json(AuthResponse {
        status: "success".to_string(),
        message: "Login bem-sucedido!".to_string(),
        user_id: user.id,
        user_name: user.nome,
        user_email: user.email,
        token,
        expira_em: expira_em.timestamp(),
    })
}
