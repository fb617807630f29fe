use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait, Set, TransactionTrait};

use crate::{
    dto::customers::{
        AddressPayload, CreateCriticRequest, CreateCustomerRequest, CreateDeliveryAgentRequest,
        CriticList, CustomerList, DeliveryAgentList, UpdateCriticRequest, UpdateCustomerRequest,
        UpdateDeliveryAgentRequest,
    },
    entity::{
        critics::{ActiveModel as CriticActive, Entity as Critics, Model as CriticModel},
        customers::{ActiveModel as CustomerActive, Entity as Customers, Model as CustomerModel},
        delivery_agents::{
            ActiveModel as AgentActive, Entity as DeliveryAgents,
        },
        Addresses,
    },
    error::{AppError, AppResult},
    models::{Address, Critic, Customer, DeliveryAgent},
    response::{ApiResponse, Meta},
    services::address_service::{self, address_from_entity},
    state::AppState,
};

// ===== customers =====

pub async fn list_customers(state: &AppState) -> AppResult<ApiResponse<CustomerList>> {
    let items = Customers::find()
        .all(&state.orm)
        .await?
        .into_iter()
        .map(customer_from_entity)
        .collect();
    Ok(ApiResponse::success("OK", CustomerList { items }, Some(Meta::empty())))
}

pub async fn get_customer(state: &AppState, id: i64) -> AppResult<ApiResponse<Customer>> {
    let customer = find_customer(state, id).await?;
    Ok(ApiResponse::success("OK", customer_from_entity(customer), None))
}

pub async fn create_customer(
    state: &AppState,
    payload: CreateCustomerRequest,
) -> AppResult<ApiResponse<Customer>> {
    if let Some(address_id) = payload.address_id {
        Addresses::find_by_id(address_id)
            .one(&state.orm)
            .await?
            .ok_or_else(|| AppError::BadRequest("address not found".to_string()))?;
    }

    let customer = CustomerActive {
        id: NotSet,
        first_name: Set(payload.first_name),
        last_name: Set(payload.last_name),
        address_id: Set(payload.address_id),
        birth_date: Set(payload.birth_date),
        phone: Set(payload.phone),
        email: Set(payload.email),
        initials: Set(payload.initials),
    }
    .insert(&state.orm)
    .await?;
    Ok(ApiResponse::success("Customer created", customer_from_entity(customer), None))
}

pub async fn update_customer(
    state: &AppState,
    id: i64,
    payload: UpdateCustomerRequest,
) -> AppResult<ApiResponse<Customer>> {
    let customer = find_customer(state, id).await?;
    let mut active: CustomerActive = customer.into();
    if let Some(first_name) = payload.first_name {
        active.first_name = Set(first_name);
    }
    if let Some(last_name) = payload.last_name {
        active.last_name = Set(last_name);
    }
    if let Some(birth_date) = payload.birth_date {
        active.birth_date = Set(Some(birth_date));
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(Some(phone));
    }
    if let Some(email) = payload.email {
        active.email = Set(Some(email));
    }
    if let Some(initials) = payload.initials {
        active.initials = Set(Some(initials));
    }
    let updated = active.update(&state.orm).await?;
    Ok(ApiResponse::success("Customer updated", customer_from_entity(updated), None))
}

/// Move a customer to another address. An existing address id is verified and
/// linked directly; new address fields go through the shared-address
/// copy-on-write path when the customer already has one.
pub async fn update_customer_address(
    state: &AppState,
    id: i64,
    payload: AddressPayload,
) -> AppResult<ApiResponse<Address>> {
    let customer = find_customer(state, id).await?;

    let txn = state.orm.begin().await?;
    let address = match payload {
        AddressPayload::Existing { address_id } => {
            let address = Addresses::find_by_id(address_id)
                .one(&txn)
                .await?
                .ok_or_else(|| AppError::BadRequest("address not found".to_string()))?;
            let mut active: CustomerActive = customer.into();
            active.address_id = Set(Some(address.id));
            active.update(&txn).await?;
            address
        }
        AddressPayload::New(fields) => match customer.address_id {
            Some(current) => {
                let update = fields.into_update();
                let (saved, copied) = address_service::cow_update(&txn, current, &update).await?;
                if copied {
                    let mut active: CustomerActive = customer.into();
                    active.address_id = Set(Some(saved.id));
                    active.update(&txn).await?;
                }
                saved
            }
            None => {
                let address = address_service::insert_address(&txn, fields).await?;
                let mut active: CustomerActive = customer.into();
                active.address_id = Set(Some(address.id));
                active.update(&txn).await?;
                address
            }
        },
    };
    txn.commit().await?;

    Ok(ApiResponse::success("Customer address updated", address_from_entity(address), None))
}

pub async fn delete_customer(state: &AppState, id: i64) -> AppResult<ApiResponse<serde_json::Value>> {
    let customer = find_customer(state, id).await?;
    customer.delete(&state.orm).await?;
    Ok(ApiResponse::success(
        "Customer deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

async fn find_customer(state: &AppState, id: i64) -> Result<CustomerModel, AppError> {
    Customers::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)
}

// ===== critics =====

pub async fn list_critics(state: &AppState) -> AppResult<ApiResponse<CriticList>> {
    let items = Critics::find()
        .all(&state.orm)
        .await?
        .into_iter()
        .map(critic_from_entity)
        .collect();
    Ok(ApiResponse::success("OK", CriticList { items }, Some(Meta::empty())))
}

pub async fn get_critic(state: &AppState, id: i64) -> AppResult<ApiResponse<Critic>> {
    let critic = find_critic(state, id).await?;
    Ok(ApiResponse::success("OK", critic_from_entity(critic), None))
}

pub async fn create_critic(
    state: &AppState,
    payload: CreateCriticRequest,
) -> AppResult<ApiResponse<Critic>> {
    if let Some(customer_id) = payload.customer_id {
        Customers::find_by_id(customer_id)
            .one(&state.orm)
            .await?
            .ok_or_else(|| AppError::BadRequest("customer not found".to_string()))?;
    }

    let critic = CriticActive {
        id: NotSet,
        customer_id: Set(payload.customer_id),
        name: Set(payload.name),
        description: Set(payload.description),
    }
    .insert(&state.orm)
    .await?;
    Ok(ApiResponse::success("Critic created", critic_from_entity(critic), None))
}

pub async fn update_critic(
    state: &AppState,
    id: i64,
    payload: UpdateCriticRequest,
) -> AppResult<ApiResponse<Critic>> {
    let critic = find_critic(state, id).await?;
    let mut active: CriticActive = critic.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    let updated = active.update(&state.orm).await?;
    Ok(ApiResponse::success("Critic updated", critic_from_entity(updated), None))
}

pub async fn delete_critic(state: &AppState, id: i64) -> AppResult<ApiResponse<serde_json::Value>> {
    let critic = find_critic(state, id).await?;
    critic.delete(&state.orm).await?;
    Ok(ApiResponse::success(
        "Critic deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

async fn find_critic(state: &AppState, id: i64) -> Result<CriticModel, AppError> {
    Critics::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)
}

// ===== delivery agents =====

pub async fn list_delivery_agents(state: &AppState) -> AppResult<ApiResponse<DeliveryAgentList>> {
    let items = DeliveryAgents::find()
        .all(&state.orm)
        .await?
        .into_iter()
        .map(crate::services::order_service::agent_from_entity)
        .collect();
    Ok(ApiResponse::success("OK", DeliveryAgentList { items }, Some(Meta::empty())))
}

pub async fn get_delivery_agent(state: &AppState, id: i64) -> AppResult<ApiResponse<DeliveryAgent>> {
    let agent = DeliveryAgents::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success(
        "OK",
        crate::services::order_service::agent_from_entity(agent),
        None,
    ))
}

pub async fn create_delivery_agent(
    state: &AppState,
    payload: CreateDeliveryAgentRequest,
) -> AppResult<ApiResponse<DeliveryAgent>> {
    let agent = AgentActive {
        id: NotSet,
        first_name: Set(payload.first_name),
        last_name: Set(payload.last_name),
        phone: Set(payload.phone),
    }
    .insert(&state.orm)
    .await?;
    Ok(ApiResponse::success(
        "Delivery agent created",
        crate::services::order_service::agent_from_entity(agent),
        None,
    ))
}

pub async fn update_delivery_agent(
    state: &AppState,
    id: i64,
    payload: UpdateDeliveryAgentRequest,
) -> AppResult<ApiResponse<DeliveryAgent>> {
    let agent = DeliveryAgents::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    let mut active: AgentActive = agent.into();
    if let Some(first_name) = payload.first_name {
        active.first_name = Set(Some(first_name));
    }
    if let Some(last_name) = payload.last_name {
        active.last_name = Set(Some(last_name));
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(Some(phone));
    }
    let updated = active.update(&state.orm).await?;
    Ok(ApiResponse::success(
        "Delivery agent updated",
        crate::services::order_service::agent_from_entity(updated),
        None,
    ))
}

pub async fn delete_delivery_agent(
    state: &AppState,
    id: i64,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let agent = DeliveryAgents::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    agent.delete(&state.orm).await?;
    Ok(ApiResponse::success(
        "Delivery agent deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

// ===== entity → model =====

pub fn customer_from_entity(model: CustomerModel) -> Customer {
    Customer {
        id: model.id,
        first_name: model.first_name,
        last_name: model.last_name,
        address_id: model.address_id,
        birth_date: model.birth_date,
        phone: model.phone,
        email: model.email,
        initials: model.initials,
    }
}

pub fn critic_from_entity(model: CriticModel) -> Critic {
    Critic {
        id: model.id,
        customer_id: model.customer_id,
        name: model.name,
        description: model.description,
    }
}
