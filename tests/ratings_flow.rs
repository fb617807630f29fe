use gaumengalopp_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    dto::ratings::{BulkSummaryRequest, CreateCriticRatingRequest, CreateCustomerRatingRequest},
    entity::{
        critics::ActiveModel as CriticActive, customers::ActiveModel as CustomerActive,
        dishes::ActiveModel as DishActive, menus::ActiveModel as MenuActive,
        prices::ActiveModel as PriceActive, restaurants::ActiveModel as RestaurantActive,
    },
    services::rating_service,
    state::AppState,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set, Statement};

// Aggregation flow: customer ratings [4, 5] and a critic rating [3] pool to an
// overall average of 4.0, highlights honor the 4.0 threshold, and a soft
// deleted rating drops out of every aggregate.
#[tokio::test]
async fn rating_aggregates_and_highlights() -> anyhow::Result<()> {
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
    let critic_id = create_critic(&state).await?;
    let (restaurant_id, dish_id) = create_restaurant_with_dish(&state, "Brauhaus Sonne").await?;
    let (other_restaurant, _other_dish) = create_restaurant_with_dish(&state, "Cafe Mond").await?;

    rating_service::create_customer_rating(
        &state,
        CreateCustomerRatingRequest {
            customer_id,
            dish_id,
            rating: 4,
            comment: Some("solide".into()),
        },
    )
    .await?;
    let five = rating_service::create_customer_rating(
        &state,
        CreateCustomerRatingRequest {
            customer_id,
            dish_id,
            rating: 5,
            comment: Some("hervorragend".into()),
        },
    )
    .await?
    .data
    .unwrap();
    rating_service::create_critic_rating(
        &state,
        CreateCriticRatingRequest {
            critic_id,
            dish_id,
            rating: 3,
        },
    )
    .await?;

    let summary = rating_service::ratings_summary(&state, restaurant_id)
        .await?
        .data
        .unwrap();
    assert_eq!(summary.customer.count, 2);
    assert_eq!(summary.customer.average, Some(4.5));
    assert_eq!(summary.critic.count, 1);
    assert_eq!(summary.critic.average, Some(3.0));
    assert_eq!(summary.overall_count, 3);
    assert_eq!(summary.overall_average, Some(4.0));

    // Bulk keeps restaurants separate; the unrated one reports nulls.
    let bulk = rating_service::ratings_summary_bulk(
        &state,
        BulkSummaryRequest {
            restaurant_ids: vec![restaurant_id, other_restaurant],
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(bulk.items.len(), 2);
    assert_eq!(bulk.items[0].restaurant_id, restaurant_id);
    assert_eq!(bulk.items[1].restaurant_id, other_restaurant);
    assert_eq!(bulk.items[1].overall_count, 0);
    assert_eq!(bulk.items[1].overall_average, None);

    // Customer average 4.5 clears the threshold, comments ride along.
    let favorites = rating_service::customer_favorites(&state, restaurant_id)
        .await?
        .data
        .unwrap();
    assert_eq!(favorites.items.len(), 1);
    assert_eq!(favorites.items[0].dish_id, dish_id);
    assert_eq!(favorites.items[0].average, 4.5);
    assert_eq!(favorites.items[0].comments.len(), 2);
    // Best-rated comment comes first.
    assert_eq!(favorites.items[0].comments[0], "hervorragend");

    // Critic average 3.0 stays below the threshold.
    let highlights = rating_service::critic_highlights(&state, restaurant_id)
        .await?
        .data
        .unwrap();
    assert!(highlights.items.is_empty());

    // Soft deleting the 5 drops it from the aggregates.
    rating_service::delete_customer_rating(&state, five.id).await?;
    let summary = rating_service::ratings_summary(&state, restaurant_id)
        .await?
        .data
        .unwrap();
    assert_eq!(summary.customer.count, 1);
    assert_eq!(summary.customer.average, Some(4.0));
    assert_eq!(summary.overall_count, 2);
    assert_eq!(summary.overall_average, Some(3.5));

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
        first_name: Set("Lena".into()),
        last_name: Set("Vogel".into()),
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

async fn create_critic(state: &AppState) -> anyhow::Result<i64> {
    let critic = CriticActive {
        id: NotSet,
        customer_id: Set(None),
        name: Set("Der Feinschmecker".into()),
        description: Set(None),
    }
    .insert(&state.orm)
    .await?;
    Ok(critic.id)
}

async fn create_restaurant_with_dish(
    state: &AppState,
    name: &str,
) -> anyhow::Result<(i64, i64)> {
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
        name: Set("Hausplatte".into()),
        description: Set(None),
        category: Set(None),
        is_active: Set(true),
    }
    .insert(&state.orm)
    .await?;

    PriceActive {
        id: NotSet,
        dish_id: Set(dish.id),
        amount_cents: Set(1500),
        valid_from: Set(None),
        valid_until: Set(None),
        price_type: Set(None),
        is_active: Set(true),
    }
    .insert(&state.orm)
    .await?;

    Ok((restaurant.id, dish.id))
}
