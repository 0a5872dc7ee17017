use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use enrollment_backend::{
    AppState, Caches,
    config::Config,
    mailer::Mailer,
    middleware::{auth_middleware, log_errors, require_api_key},
    routes,
    routes::setting::model::Setting,
    seed,
};
use sqlx::Executor;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 加载配置
    let config = Config::from_env().expect("Failed to load configuration");

    // 设置数据库连接池
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                conn.execute("SET application_name = 'enrollment_backend';")
                    .await?;
                Ok(())
            })
        })
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to Postgres");

    // seed 子命令：写入演示教室后退出
    if std::env::args().nth(1).as_deref() == Some("seed") {
        match seed::seed_classrooms(&pool).await {
            Ok(count) => {
                tracing::info!("Seed finished, {} classrooms inserted", count);
                std::process::exit(0);
            }
            Err(e) => {
                tracing::error!("Seed failed: {}", e);
                std::process::exit(1);
            }
        }
    }

    // 设置邮件客户端
    let mailer = Mailer::new(config.mailer_api_url.clone()).expect("Failed to create mail client");

    // 设置应用状态
    let state = AppState {
        pool,
        config,
        caches: Arc::new(Caches::default()),
        mailer,
    };

    // 启动时预热设置缓存，失败不致命，首个请求会再取
    match Setting::fetch_map(&state.pool).await {
        Ok(map) => {
            let count = map.len();
            state.caches.settings.set(map);
            tracing::info!("Settings cache warmed with {} entries", count);
        }
        Err(e) => {
            tracing::warn!("Failed to warm settings cache, starting empty: {}", e);
        }
    }

    // 公开的资源路由
    let public_routes = Router::new()
        // 设置路由
        .route(
            "/setting",
            get(routes::setting::get_all_settings).post(routes::setting::create_setting),
        )
        .route(
            "/setting/{key}",
            get(routes::setting::get_setting_by_key)
                .put(routes::setting::update_setting)
                .delete(routes::setting::delete_setting),
        )
        // 教室路由
        .route(
            "/classroom",
            get(routes::classroom::get_all_classrooms).post(routes::classroom::create_classroom),
        )
        .route(
            "/classroom/{id}",
            get(routes::classroom::get_classroom_by_id)
                .put(routes::classroom::update_classroom)
                .delete(routes::classroom::delete_classroom),
        )
        // 课程路由
        .route(
            "/course",
            get(routes::course::get_all_courses).post(routes::course::create_course),
        )
        .route(
            "/course/{id}",
            get(routes::course::get_course_by_id)
                .put(routes::course::update_course)
                .delete(routes::course::delete_course),
        )
        .route(
            "/course/class/{class_id}",
            get(routes::course::get_courses_by_class_id),
        )
        // 报名路由
        .route(
            "/registration",
            get(routes::registration::get_all_registrations)
                .post(routes::registration::create_registration),
        )
        .route(
            "/registration/{id}",
            get(routes::registration::get_registration_by_id)
                .delete(routes::registration::delete_registration),
        )
        // 院系路由
        .route("/faculty", get(routes::faculty::get_all_faculties))
        .route("/faculty/{id}", get(routes::faculty::get_faculty_by_id))
        // 邮件代理路由
        .route("/mail/send-queue", post(routes::mail::send_mail_queue))
        .route("/mail/test-connection", get(routes::mail::test_connection));

    // 注册登录走静态 APIKEY 闸口
    let auth_routes = Router::new()
        .route("/auth/register", post(routes::auth::register))
        .route("/auth/login", post(routes::auth::login))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));

    // 需要 JWT 的路由
    let protected_routes = Router::new()
        .route("/auth/validate", get(routes::auth::validate))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // 创建基础路由
    let router = Router::new().nest(
        "/api",
        Router::new()
            .merge(public_routes)
            .merge(auth_routes)
            .merge(protected_routes),
    );

    // 添加日志中间件，前端跨域访问所以 CORS 全放开
    let router = router
        .layer(axum::middleware::from_fn(log_errors))
        .layer(CorsLayer::permissive());

    // 添加应用状态
    let app = router.with_state(state.clone());

    // 启动服务器
    let addr = SocketAddr::new(
        state.config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        state.config.server_port,
    );
    tracing::info!("Server listening on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app.into_make_service(),
    )
    .await
    .expect("Failed to start server");
}
