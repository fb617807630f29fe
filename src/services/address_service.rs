use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, Set, TransactionTrait,
};

use crate::{
    dto::addresses::{AddressList, CreateAddressRequest, UpdateAddressRequest},
    entity::{
        addresses::{ActiveModel as AddressActive, Column as AddressCol, Entity as Addresses,
                    Model as AddressModel},
        customers::Column as CustomerCol,
        orders::Column as OrderCol,
        restaurants::Column as RestaurantCol,
        Customers, Orders, Restaurants,
    },
    error::{AppError, AppResult},
    models::Address,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_addresses(state: &AppState) -> AppResult<ApiResponse<AddressList>> {
    let items = Addresses::find()
        .all(&state.orm)
        .await?
        .into_iter()
        .map(address_from_entity)
        .collect();
    Ok(ApiResponse::success("OK", AddressList { items }, Some(Meta::empty())))
}

pub async fn get_address(state: &AppState, id: i64) -> AppResult<ApiResponse<Address>> {
    let address = Addresses::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("OK", address_from_entity(address), None))
}

pub async fn search_by_postal_code(
    state: &AppState,
    postal_code: &str,
) -> AppResult<ApiResponse<AddressList>> {
    let items = Addresses::find()
        .filter(AddressCol::PostalCode.eq(postal_code))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(address_from_entity)
        .collect();
    Ok(ApiResponse::success("OK", AddressList { items }, Some(Meta::empty())))
}

pub async fn create_address(
    state: &AppState,
    payload: CreateAddressRequest,
) -> AppResult<ApiResponse<Address>> {
    let address = insert_address(&state.orm, payload).await?;
    Ok(ApiResponse::success("Address created", address_from_entity(address), None))
}

/// Copy-on-write update. When the address is referenced by more than one
/// owner, a fresh row with the merged fields is inserted and the original is
/// left untouched; the caller repoints its own foreign key to the returned id.
pub async fn update_address(
    state: &AppState,
    id: i64,
    payload: UpdateAddressRequest,
) -> AppResult<ApiResponse<Address>> {
    let txn = state.orm.begin().await?;
    let (saved, copied) = cow_update(&txn, id, &payload).await?;
    txn.commit().await?;

    let message = if copied {
        "Address copied for update"
    } else {
        "Address updated"
    };
    Ok(ApiResponse::success(message, address_from_entity(saved), None))
}

pub async fn delete_address(state: &AppState, id: i64) -> AppResult<ApiResponse<serde_json::Value>> {
    let address = Addresses::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let usage = count_owners(&state.orm, id).await?;
    if usage > 0 {
        return Err(AppError::BadRequest(
            "address is still referenced by a customer, restaurant or order".to_string(),
        ));
    }

    address.delete(&state.orm).await?;
    Ok(ApiResponse::success(
        "Address deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

/// The count-and-write pair runs on the caller's transaction so the usage
/// count cannot go stale between the check and the mutation.
pub async fn cow_update<C: ConnectionTrait>(
    conn: &C,
    id: i64,
    payload: &UpdateAddressRequest,
) -> Result<(AddressModel, bool), AppError> {
    let existing = Addresses::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(AppError::NotFound)?;

    let usage = count_owners(conn, id).await?;
    // The caller is one of the referents, so usage 1 means "only the caller".
    if usage > 1 {
        let merged = merged_fields(&existing, payload);
        let inserted = AddressActive {
            id: NotSet,
            street: Set(merged.street),
            house_number: Set(merged.house_number),
            postal_code: Set(merged.postal_code),
            city: Set(merged.city),
            country: Set(merged.country),
        }
        .insert(conn)
        .await?;
        tracing::debug!(
            original = existing.id,
            copy = inserted.id,
            owners = usage,
            "shared address cloned on update"
        );
        Ok((inserted, true))
    } else {
        let mut active: AddressActive = existing.into();
        if let Some(street) = &payload.street {
            active.street = Set(street.clone());
        }
        if let Some(house_number) = &payload.house_number {
            active.house_number = Set(house_number.clone());
        }
        if let Some(postal_code) = &payload.postal_code {
            active.postal_code = Set(postal_code.clone());
        }
        if let Some(city) = &payload.city {
            active.city = Set(city.clone());
        }
        if let Some(country) = &payload.country {
            active.country = Set(country.clone());
        }
        let updated = active.update(conn).await?;
        Ok((updated, false))
    }
}

pub async fn insert_address<C: ConnectionTrait>(
    conn: &C,
    payload: CreateAddressRequest,
) -> Result<AddressModel, DbErr> {
    AddressActive {
        id: NotSet,
        street: Set(payload.street),
        house_number: Set(payload.house_number),
        postal_code: Set(payload.postal_code),
        city: Set(payload.city),
        country: Set(payload.country),
    }
    .insert(conn)
    .await
}

async fn count_owners<C: ConnectionTrait>(conn: &C, address_id: i64) -> Result<u64, DbErr> {
    let customers = Customers::find()
        .filter(CustomerCol::AddressId.eq(address_id))
        .count(conn)
        .await?;
    let restaurants = Restaurants::find()
        .filter(RestaurantCol::AddressId.eq(address_id))
        .count(conn)
        .await?;
    let orders = Orders::find()
        .filter(OrderCol::AddressId.eq(address_id))
        .count(conn)
        .await?;
    Ok(customers + restaurants + orders)
}

fn merged_fields(existing: &AddressModel, payload: &UpdateAddressRequest) -> AddressModel {
    AddressModel {
        id: existing.id,
        street: payload.street.clone().unwrap_or_else(|| existing.street.clone()),
        house_number: payload
            .house_number
            .clone()
            .unwrap_or_else(|| existing.house_number.clone()),
        postal_code: payload
            .postal_code
            .clone()
            .unwrap_or_else(|| existing.postal_code.clone()),
        city: payload.city.clone().unwrap_or_else(|| existing.city.clone()),
        country: payload.country.clone().unwrap_or_else(|| existing.country.clone()),
    }
}

pub fn address_from_entity(model: AddressModel) -> Address {
    Address {
        id: model.id,
        street: model.street,
        house_number: model.house_number,
        postal_code: model.postal_code,
        city: model.city,
        country: model.country,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AddressModel {
        AddressModel {
            id: 7,
            street: "Hauptstrasse".into(),
            house_number: "12a".into(),
            postal_code: "68159".into(),
            city: "Mannheim".into(),
            country: "DE".into(),
        }
    }

    #[test]
    fn merge_keeps_unset_fields() {
        let payload = UpdateAddressRequest {
            street: Some("Ringstrasse".into()),
            house_number: None,
            postal_code: None,
            city: None,
            country: None,
        };
        let merged = merged_fields(&sample(), &payload);
        assert_eq!(merged.street, "Ringstrasse");
        assert_eq!(merged.house_number, "12a");
        assert_eq!(merged.city, "Mannheim");
    }

    #[test]
    fn merge_overwrites_all_supplied_fields() {
        let payload = UpdateAddressRequest {
            street: Some("Neuer Weg".into()),
            house_number: Some("3".into()),
            postal_code: Some("10115".into()),
            city: Some("Berlin".into()),
            country: Some("DE".into()),
        };
        let merged = merged_fields(&sample(), &payload);
        assert_eq!(merged.street, "Neuer Weg");
        assert_eq!(merged.postal_code, "10115");
        assert_eq!(merged.city, "Berlin");
    }
}
