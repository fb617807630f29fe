use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, Set};

use crate::{
    dto::catalog::{
        CreateDishRequest, CreateMenuRequest, CreatePriceRequest, DishList, MenuList, PriceList,
        UpdateDishRequest, UpdateMenuRequest, UpdatePriceRequest,
    },
    entity::{
        dishes::{ActiveModel as DishActive, Column as DishCol, Entity as Dishes,
                 Model as DishModel},
        menus::{ActiveModel as MenuActive, Column as MenuCol, Entity as Menus,
                Model as MenuModel},
        prices::{ActiveModel as PriceActive, Column as PriceCol, Entity as Prices,
                 Model as PriceModel},
    },
    error::{AppError, AppResult},
    models::{Dish, Menu, Price},
    response::{ApiResponse, Meta},
    state::AppState,
};

// ===== menus =====

pub async fn list_menus(
    state: &AppState,
    restaurant_id: Option<i64>,
) -> AppResult<ApiResponse<MenuList>> {
    let mut finder = Menus::find();
    if let Some(restaurant_id) = restaurant_id {
        finder = finder.filter(MenuCol::RestaurantId.eq(restaurant_id));
    }
    let items = finder
        .all(&state.orm)
        .await?
        .into_iter()
        .map(menu_from_entity)
        .collect();
    Ok(ApiResponse::success("OK", MenuList { items }, Some(Meta::empty())))
}

pub async fn get_menu(state: &AppState, id: i64) -> AppResult<ApiResponse<Menu>> {
    let menu = Menus::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("OK", menu_from_entity(menu), None))
}

pub async fn create_menu(
    state: &AppState,
    payload: CreateMenuRequest,
) -> AppResult<ApiResponse<Menu>> {
    let menu = MenuActive {
        id: NotSet,
        restaurant_id: Set(payload.restaurant_id),
        name: Set(payload.name),
    }
    .insert(&state.orm)
    .await?;
    Ok(ApiResponse::success("Menu created", menu_from_entity(menu), None))
}

pub async fn update_menu(
    state: &AppState,
    id: i64,
    payload: UpdateMenuRequest,
) -> AppResult<ApiResponse<Menu>> {
    let menu = Menus::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    let mut active: MenuActive = menu.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    let updated = active.update(&state.orm).await?;
    Ok(ApiResponse::success("Menu updated", menu_from_entity(updated), None))
}

pub async fn delete_menu(state: &AppState, id: i64) -> AppResult<ApiResponse<serde_json::Value>> {
    let menu = Menus::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    menu.delete(&state.orm).await?;
    Ok(ApiResponse::success(
        "Menu deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

// ===== dishes =====

pub async fn list_dishes(
    state: &AppState,
    menu_id: Option<i64>,
) -> AppResult<ApiResponse<DishList>> {
    let mut finder = Dishes::find();
    if let Some(menu_id) = menu_id {
        finder = finder.filter(DishCol::MenuId.eq(menu_id));
    }
    let items = finder
        .all(&state.orm)
        .await?
        .into_iter()
        .map(dish_from_entity)
        .collect();
    Ok(ApiResponse::success("OK", DishList { items }, Some(Meta::empty())))
}

pub async fn get_dish(state: &AppState, id: i64) -> AppResult<ApiResponse<Dish>> {
    let dish = Dishes::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("OK", dish_from_entity(dish), None))
}

pub async fn create_dish(
    state: &AppState,
    payload: CreateDishRequest,
) -> AppResult<ApiResponse<Dish>> {
    let dish = DishActive {
        id: NotSet,
        menu_id: Set(payload.menu_id),
        name: Set(payload.name),
        description: Set(payload.description),
        category: Set(payload.category),
        is_active: Set(true),
    }
    .insert(&state.orm)
    .await?;
    Ok(ApiResponse::success("Dish created", dish_from_entity(dish), None))
}

pub async fn update_dish(
    state: &AppState,
    id: i64,
    payload: UpdateDishRequest,
) -> AppResult<ApiResponse<Dish>> {
    let dish = Dishes::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    let mut active: DishActive = dish.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    if let Some(category) = payload.category {
        active.category = Set(Some(category));
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    let updated = active.update(&state.orm).await?;
    Ok(ApiResponse::success("Dish updated", dish_from_entity(updated), None))
}

pub async fn delete_dish(state: &AppState, id: i64) -> AppResult<ApiResponse<serde_json::Value>> {
    let dish = Dishes::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    // Dishes are referenced by ratings and historical orders, so retire
    // instead of deleting.
    let mut active: DishActive = dish.into();
    active.is_active = Set(false);
    active.update(&state.orm).await?;
    Ok(ApiResponse::success(
        "Dish deactivated",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

// ===== prices =====

pub async fn list_prices(
    state: &AppState,
    dish_id: Option<i64>,
) -> AppResult<ApiResponse<PriceList>> {
    let mut finder = Prices::find();
    if let Some(dish_id) = dish_id {
        finder = finder.filter(PriceCol::DishId.eq(dish_id));
    }
    let items = finder
        .all(&state.orm)
        .await?
        .into_iter()
        .map(price_from_entity)
        .collect();
    Ok(ApiResponse::success("OK", PriceList { items }, Some(Meta::empty())))
}

pub async fn get_price(state: &AppState, id: i64) -> AppResult<ApiResponse<Price>> {
    let price = Prices::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("OK", price_from_entity(price), None))
}

/// The price currently flagged active for a dish. Uniqueness is reconciled by
/// this query, not enforced by a constraint.
pub async fn get_active_price(state: &AppState, dish_id: i64) -> AppResult<ApiResponse<Price>> {
    let price = Prices::find()
        .filter(PriceCol::DishId.eq(dish_id))
        .filter(PriceCol::IsActive.eq(true))
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("OK", price_from_entity(price), None))
}

pub async fn create_price(
    state: &AppState,
    payload: CreatePriceRequest,
) -> AppResult<ApiResponse<Price>> {
    if payload.amount_cents < 0 {
        return Err(AppError::BadRequest("amount must not be negative".to_string()));
    }

    // A new active price displaces the previous one.
    if payload.is_active {
        let previous = Prices::find()
            .filter(PriceCol::DishId.eq(payload.dish_id))
            .filter(PriceCol::IsActive.eq(true))
            .all(&state.orm)
            .await?;
        for price in previous {
            let mut active: PriceActive = price.into();
            active.is_active = Set(false);
            active.update(&state.orm).await?;
        }
    }

    let price = PriceActive {
        id: NotSet,
        dish_id: Set(payload.dish_id),
        amount_cents: Set(payload.amount_cents),
        valid_from: Set(payload.valid_from.map(Into::into)),
        valid_until: Set(payload.valid_until.map(Into::into)),
        price_type: Set(payload.price_type),
        is_active: Set(payload.is_active),
    }
    .insert(&state.orm)
    .await?;
    Ok(ApiResponse::success("Price created", price_from_entity(price), None))
}

pub async fn update_price(
    state: &AppState,
    id: i64,
    payload: UpdatePriceRequest,
) -> AppResult<ApiResponse<Price>> {
    let price = Prices::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    let mut active: PriceActive = price.into();
    if let Some(amount_cents) = payload.amount_cents {
        if amount_cents < 0 {
            return Err(AppError::BadRequest("amount must not be negative".to_string()));
        }
        active.amount_cents = Set(amount_cents);
    }
    if let Some(valid_from) = payload.valid_from {
        active.valid_from = Set(Some(valid_from.into()));
    }
    if let Some(valid_until) = payload.valid_until {
        active.valid_until = Set(Some(valid_until.into()));
    }
    if let Some(price_type) = payload.price_type {
        active.price_type = Set(Some(price_type));
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    let updated = active.update(&state.orm).await?;
    Ok(ApiResponse::success("Price updated", price_from_entity(updated), None))
}

pub async fn delete_price(state: &AppState, id: i64) -> AppResult<ApiResponse<serde_json::Value>> {
    let price = Prices::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    let mut active: PriceActive = price.into();
    active.is_active = Set(false);
    active.update(&state.orm).await?;
    Ok(ApiResponse::success(
        "Price deactivated",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

// ===== entity → model =====

pub fn menu_from_entity(model: MenuModel) -> Menu {
    Menu {
        id: model.id,
        restaurant_id: model.restaurant_id,
        name: model.name,
    }
}

pub fn dish_from_entity(model: DishModel) -> Dish {
    Dish {
        id: model.id,
        menu_id: model.menu_id,
        name: model.name,
        description: model.description,
        category: model.category,
        is_active: model.is_active,
    }
}

pub fn price_from_entity(model: PriceModel) -> Price {
    Price {
        id: model.id,
        dish_id: model.dish_id,
        amount_cents: model.amount_cents,
        valid_from: model.valid_from.map(|dt| dt.with_timezone(&Utc)),
        valid_until: model.valid_until.map(|dt| dt.with_timezone(&Utc)),
        price_type: model.price_type,
        is_active: model.is_active,
    }
}
