use crate::view::{ProductListController, ProductListView};
use tauri::{AppHandle, Emitter, Manager};

pub const PRODUCTS_CHANGED: &str = "products-changed";

pub trait ProductsExt {
    fn products(&self) -> &ProductListController;
}

impl ProductsExt for AppHandle {
    fn products(&self) -> &ProductListController {
        self.state::<ProductListController>().inner()
    }
}

fn notify_changed(app: &AppHandle) {
    if let Err(e) = app.emit(PRODUCTS_CHANGED, ()) {
        tracing::warn!("could not emit {PRODUCTS_CHANGED}: {e}");
    }
}

#[tauri::command]
pub fn get_view(app: AppHandle) -> Result<ProductListView, String> {
    app.products().snapshot().map_err(|e| e.to_string())
}

#[tauri::command]
pub fn render_view(app: AppHandle) -> Result<String, String> {
    app.products().render().map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn load_products(app: AppHandle) -> Result<(), String> {
    app.products().load().await.map_err(|e| e.to_string())?;
    notify_changed(&app);
    Ok(())
}

#[tauri::command]
pub fn update_form_field(app: AppHandle, field: String, value: String) -> Result<(), String> {
    app.products()
        .handle_input_change(&field, &value)
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn start_edit(app: AppHandle, id: i64) -> Result<bool, String> {
    let found = app.products().start_edit(id).map_err(|e| e.to_string())?;
    if found {
        notify_changed(&app);
    }
    Ok(found)
}

#[tauri::command]
pub async fn submit_form(app: AppHandle) -> Result<(), String> {
    app.products().submit().await.map_err(|e| e.to_string())?;
    notify_changed(&app);
    Ok(())
}

#[tauri::command]
pub async fn delete_product(app: AppHandle, id: i64) -> Result<(), String> {
    app.products().delete(id).await.map_err(|e| e.to_string())?;
    notify_changed(&app);
    Ok(())
}
