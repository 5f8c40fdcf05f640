pub mod api;
#[cfg(feature = "gui")]
mod commands;
pub mod config;
pub mod error;
pub mod form;
pub mod models;
pub mod render;
pub mod view;


pub use api::ProductsApi;
pub use config::{ApiConfig, SyncPolicy};
pub use error::{Error, Result};
pub use view::{ProductListController, ProductListView, ViewState};

/// Installs the stderr log subscriber. `RUST_LOG` overrides the default levels.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_file(true)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_line_number(true)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            if cfg!(debug_assertions) {
                "debug,reqwest=info,hyper=info,hyper_util=info".into()
            } else {
                "info".into()
            }
        }))
        .try_init();
}

#[cfg(feature = "gui")]
fn spawn_load(app: tauri::AppHandle) {
    tauri::async_runtime::spawn(async move {
        if let Err(e) = commands::products::load_products(app).await {
            tracing::error!("product load failed: {e}");
        }
    });
}

#[cfg(feature = "gui")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use commands::products;
    use tauri::{
        menu::{Menu, MenuItem},
        tray::{MouseButton, MouseButtonState, TrayIconBuilder, TrayIconEvent},
        Manager,
    };

    init_tracing();

    let config = ApiConfig::from_env().expect("Failed to read products service configuration");
    tracing::info!(
        base_url = %config.base_url,
        policy = ?config.sync_policy,
        "starting product desk"
    );

    tauri::Builder::default()
        .setup(move |app| {
            let api = ProductsApi::new(&config)?;
            app.manage(ProductListController::new(api, config.sync_policy));

            // First fetch; the webview shows the loading state until it settles
            spawn_load(app.handle().clone());

            let reload = MenuItem::with_id(app, "reload", "Recargar productos", true, None::<&str>)?;
            let quit = MenuItem::with_id(app, "quit", "Quit", true, None::<&str>)?;
            let menu = Menu::with_items(app, &[&reload, &quit])?;

            let mut tray = TrayIconBuilder::new()
                .menu(&menu)
                .show_menu_on_left_click(false);
            if let Some(icon) = app.default_window_icon() {
                tray = tray.icon(icon.clone());
            }

            let _tray = tray
                .on_tray_icon_event(|tray, event| {
                    if let TrayIconEvent::Click {
                        button: MouseButton::Left,
                        button_state: MouseButtonState::Up,
                        ..
                    } = event
                    {
                        let app = tray.app_handle();
                        if let Some(window) = app.get_webview_window("main") {
                            if window.is_visible().unwrap_or(false) {
                                let _ = window.hide();
                            } else {
                                let _ = window.show();
                                let _ = window.set_focus();
                            }
                        }
                    }
                })
                .on_menu_event(|app, event| {
                    if event.id == "reload" {
                        spawn_load(app.clone());
                    } else if event.id == "quit" {
                        app.exit(0);
                    }
                })
                .build(app)?;

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            products::get_view,
            products::render_view,
            products::load_products,
            products::update_form_field,
            products::start_edit,
            products::submit_form,
            products::delete_product,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
