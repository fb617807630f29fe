use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, ModelTrait, QueryFilter, QueryOrder,
    Set,
};

use crate::{
    dto::hours::TemplateWithDetails,
    dto::restaurants::{
        CreateRestaurantRequest, DishWithPrices, MenuWithDishes, RestaurantDetail, RestaurantList,
        RestaurantQuery, UpdateRestaurantRequest,
    },
    entity::{
        dishes::Column as DishCol,
        menus::Column as MenuCol,
        restaurant_hours::{ActiveModel as RestaurantHoursActive, Column as HoursLinkCol},
        restaurants::{ActiveModel as RestaurantActive, Column as RestaurantCol,
                      Entity as Restaurants},
        prices::Column as PriceCol,
        Addresses, Dishes, Menus, OpeningHoursTemplates, Prices, RestaurantHours,
    },
    error::{AppError, AppResult},
    models::Restaurant,
    response::{ApiResponse, Meta},
    services::{
        address_service::address_from_entity,
        catalog_service::{dish_from_entity, menu_from_entity, price_from_entity},
        hours_service::template_with_details,
        order_service::restaurant_from_entity,
    },
    state::AppState,
};

pub async fn list_restaurants(
    state: &AppState,
    query: RestaurantQuery,
) -> AppResult<ApiResponse<RestaurantList>> {
    let mut condition = Condition::all();
    if let Some(name) = query.name.as_ref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{name}%");
        condition = condition.add(Expr::col(RestaurantCol::Name).ilike(pattern));
    }
    if let Some(classification) = query.classification.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(RestaurantCol::Classification.eq(classification.clone()));
    }

    let items = Restaurants::find()
        .filter(condition)
        .order_by_asc(RestaurantCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(restaurant_from_entity)
        .collect();
    Ok(ApiResponse::success("OK", RestaurantList { items }, Some(Meta::empty())))
}

pub async fn get_restaurant(state: &AppState, id: i64) -> AppResult<ApiResponse<Restaurant>> {
    let restaurant = Restaurants::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("OK", restaurant_from_entity(restaurant), None))
}

/// Restaurant with its address and the whole menu tree down to the prices.
pub async fn get_restaurant_detail(
    state: &AppState,
    id: i64,
) -> AppResult<ApiResponse<RestaurantDetail>> {
    let restaurant = Restaurants::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let address = match restaurant.address_id {
        Some(address_id) => Addresses::find_by_id(address_id)
            .one(&state.orm)
            .await?
            .map(address_from_entity),
        None => None,
    };

    let menus = Menus::find()
        .filter(MenuCol::RestaurantId.eq(restaurant.id))
        .all(&state.orm)
        .await?;

    let mut menu_views = Vec::with_capacity(menus.len());
    for menu in menus {
        let dishes = Dishes::find()
            .filter(DishCol::MenuId.eq(menu.id))
            .all(&state.orm)
            .await?;
        let mut dish_views = Vec::with_capacity(dishes.len());
        for dish in dishes {
            let prices = Prices::find()
                .filter(PriceCol::DishId.eq(dish.id))
                .all(&state.orm)
                .await?
                .into_iter()
                .map(price_from_entity)
                .collect();
            dish_views.push(DishWithPrices {
                dish: dish_from_entity(dish),
                prices,
            });
        }
        menu_views.push(MenuWithDishes {
            menu: menu_from_entity(menu),
            dishes: dish_views,
        });
    }

    let detail = RestaurantDetail {
        restaurant: restaurant_from_entity(restaurant),
        address,
        menus: menu_views,
    };
    Ok(ApiResponse::success("OK", detail, Some(Meta::empty())))
}

pub async fn create_restaurant(
    state: &AppState,
    payload: CreateRestaurantRequest,
) -> AppResult<ApiResponse<Restaurant>> {
    let restaurant = RestaurantActive {
        id: NotSet,
        name: Set(payload.name),
        classification: Set(payload.classification),
        address_id: Set(payload.address_id),
        phone: Set(payload.phone),
        head_chef: Set(payload.head_chef),
    }
    .insert(&state.orm)
    .await?;
    Ok(ApiResponse::success(
        "Restaurant created",
        restaurant_from_entity(restaurant),
        None,
    ))
}

pub async fn update_restaurant(
    state: &AppState,
    id: i64,
    payload: UpdateRestaurantRequest,
) -> AppResult<ApiResponse<Restaurant>> {
    let restaurant = Restaurants::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: RestaurantActive = restaurant.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(classification) = payload.classification {
        active.classification = Set(Some(classification));
    }
    if let Some(address_id) = payload.address_id {
        active.address_id = Set(Some(address_id));
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(Some(phone));
    }
    if let Some(head_chef) = payload.head_chef {
        active.head_chef = Set(Some(head_chef));
    }
    let updated = active.update(&state.orm).await?;
    Ok(ApiResponse::success(
        "Restaurant updated",
        restaurant_from_entity(updated),
        None,
    ))
}

pub async fn delete_restaurant(
    state: &AppState,
    id: i64,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let restaurant = Restaurants::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    restaurant.delete(&state.orm).await?;
    Ok(ApiResponse::success(
        "Restaurant deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

// ===== opening hours assignment =====

pub async fn assign_hours_template(
    state: &AppState,
    restaurant_id: i64,
    template_id: i64,
) -> AppResult<ApiResponse<serde_json::Value>> {
    if Restaurants::find_by_id(restaurant_id)
        .one(&state.orm)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound);
    }
    if OpeningHoursTemplates::find_by_id(template_id)
        .one(&state.orm)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound);
    }

    let existing = RestaurantHours::find()
        .filter(HoursLinkCol::RestaurantId.eq(restaurant_id))
        .filter(HoursLinkCol::TemplateId.eq(template_id))
        .one(&state.orm)
        .await?;
    if existing.is_none() {
        RestaurantHoursActive {
            id: NotSet,
            restaurant_id: Set(restaurant_id),
            template_id: Set(template_id),
        }
        .insert(&state.orm)
        .await?;
    }

    Ok(ApiResponse::success(
        "Opening hours assigned",
        serde_json::json!({ "restaurant_id": restaurant_id, "template_id": template_id }),
        Some(Meta::empty()),
    ))
}

pub async fn get_restaurant_hours(
    state: &AppState,
    restaurant_id: i64,
) -> AppResult<ApiResponse<Vec<TemplateWithDetails>>> {
    if Restaurants::find_by_id(restaurant_id)
        .one(&state.orm)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound);
    }

    let links = RestaurantHours::find()
        .filter(HoursLinkCol::RestaurantId.eq(restaurant_id))
        .all(&state.orm)
        .await?;

    let mut templates = Vec::with_capacity(links.len());
    for link in links {
        if let Some(template) = OpeningHoursTemplates::find_by_id(link.template_id)
            .one(&state.orm)
            .await?
        {
            templates.push(template_with_details(state, template).await?);
        }
    }

    Ok(ApiResponse::success("OK", templates, Some(Meta::empty())))
}
