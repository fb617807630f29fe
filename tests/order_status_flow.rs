use gaumengalopp_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    dto::{
        cart::{AddCartItemRequest, CheckoutRequest},
        orders::{OrderListQuery, UpdateOrderStatusRequest},
    },
    entity::{
        addresses::ActiveModel as AddressActive, customers::ActiveModel as CustomerActive,
        delivery_agents::ActiveModel as AgentActive, dishes::ActiveModel as DishActive,
        menus::ActiveModel as MenuActive, prices::ActiveModel as PriceActive,
        restaurants::ActiveModel as RestaurantActive,
    },
    error::AppError,
    models::OrderStatus,
    routes::params::Pagination,
    services::{cart_service, order_service},
    state::AppState,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set, Statement};

// A placed order walks received -> in_delivery -> delivered and nothing else.
#[tokio::test]
async fn placed_orders_follow_the_status_ladder() -> anyhow::Result<()> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let state = setup_state(&database_url).await?;

    let customer_id = create_customer(&state).await?;
    let address_id = create_address(&state).await?;
    let agent_id = create_agent(&state).await?;
    let (restaurant_id, dish_id, price_id) = create_restaurant(&state, "Gasthaus Adler", 800).await?;

    cart_service::add_item(
        &state,
        customer_id,
        AddCartItemRequest {
            restaurant_id,
            dish_id,
            price_id,
            quantity: 1,
            note: None,
        },
    )
    .await?;
    let checkout = cart_service::checkout(
        &state,
        customer_id,
        CheckoutRequest {
            address_id,
            delivery_agent_id: agent_id,
        },
    )
    .await?
    .data
    .unwrap();

    // Received cannot jump straight to delivered.
    let err = order_service::update_status(
        &state,
        checkout.order_id,
        UpdateOrderStatusRequest {
            status: OrderStatus::Delivered,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let step = order_service::update_status(
        &state,
        checkout.order_id,
        UpdateOrderStatusRequest {
            status: OrderStatus::InDelivery,
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(step.status, OrderStatus::InDelivery);

    let step = order_service::update_status(
        &state,
        checkout.order_id,
        UpdateOrderStatusRequest {
            status: OrderStatus::Delivered,
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(step.status, OrderStatus::Delivered);

    // Delivered is terminal.
    let err = order_service::update_status(
        &state,
        checkout.order_id,
        UpdateOrderStatusRequest {
            status: OrderStatus::Cancelled,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    // The order list excludes drafts and finds the delivered order.
    let list = order_service::list_orders(
        &state,
        OrderListQuery {
            pagination: Pagination {
                page: Some(1),
                per_page: Some(20),
            },
            status: Some(OrderStatus::Delivered),
            sort_order: None,
        },
    )
    .await?
    .data
    .unwrap();
    assert!(list.items.iter().any(|o| o.id == checkout.order_id));

    Ok(())
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url, 5).await?;
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;

    // Clean tables between runs
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE order_items, orders, customer_ratings, critic_ratings, restaurant_hours, \
         opening_hours_details, opening_hours_templates, prices, dishes, menus, critics, \
         restaurants, customers, delivery_agents, addresses RESTART IDENTITY CASCADE",
    ))
    .await?;

    Ok(AppState::new(pool, orm))
}

async fn create_customer(state: &AppState) -> anyhow::Result<i64> {
    let customer = CustomerActive {
        id: NotSet,
        first_name: Set("Jonas".into()),
        last_name: Set("Brandt".into()),
        address_id: Set(None),
        birth_date: Set(None),
        phone: Set(None),
        email: Set(None),
        initials: Set(None),
    }
    .insert(&state.orm)
    .await?;
    Ok(customer.id)
}

async fn create_address(state: &AppState) -> anyhow::Result<i64> {
    let address = AddressActive {
        id: NotSet,
        street: Set("Bahnhofstrasse".into()),
        house_number: Set("4".into()),
        postal_code: Set("69115".into()),
        city: Set("Heidelberg".into()),
        country: Set("DE".into()),
    }
    .insert(&state.orm)
    .await?;
    Ok(address.id)
}

async fn create_agent(state: &AppState) -> anyhow::Result<i64> {
    let agent = AgentActive {
        id: NotSet,
        first_name: Set(Some("Sven".into())),
        last_name: Set(Some("Albrecht".into())),
        phone: Set(None),
    }
    .insert(&state.orm)
    .await?;
    Ok(agent.id)
}

async fn create_restaurant(
    state: &AppState,
    name: &str,
    amount_cents: i64,
) -> anyhow::Result<(i64, i64, i64)> {
    let restaurant = RestaurantActive {
        id: NotSet,
        name: Set(name.to_string()),
        classification: Set(None),
        address_id: Set(None),
        phone: Set(None),
        head_chef: Set(None),
    }
    .insert(&state.orm)
    .await?;

    let menu = MenuActive {
        id: NotSet,
        restaurant_id: Set(restaurant.id),
        name: Set("Hauptkarte".into()),
    }
    .insert(&state.orm)
    .await?;

    let dish = DishActive {
        id: NotSet,
        menu_id: Set(menu.id),
        name: Set("Tagesgericht".into()),
        description: Set(None),
        category: Set(Some("main".into())),
        is_active: Set(true),
    }
    .insert(&state.orm)
    .await?;

    let price = PriceActive {
        id: NotSet,
        dish_id: Set(dish.id),
        amount_cents: Set(amount_cents),
        valid_from: Set(None),
        valid_until: Set(None),
        price_type: Set(None),
        is_active: Set(true),
    }
    .insert(&state.orm)
    .await?;

    Ok((restaurant.id, dish.id, price.id))
}
