use gaumengalopp_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    dto::{
        addresses::{CreateAddressRequest, UpdateAddressRequest},
        customers::AddressPayload,
    },
    entity::{customers::ActiveModel as CustomerActive, Customers},
    error::AppError,
    services::{address_service, customer_service},
    state::AppState,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set, Statement};

// Copy-on-write flow: an address with a single owner is rewritten in place,
// a shared one is cloned and only the caller is repointed.
#[tokio::test]
async fn shared_addresses_are_cloned_on_update() -> anyhow::Result<()> {
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

    let address = address_service::create_address(
        &state,
        CreateAddressRequest {
            street: "Hauptstrasse".into(),
            house_number: "12".into(),
            postal_code: "68159".into(),
            city: "Mannheim".into(),
            country: "DE".into(),
        },
    )
    .await?
    .data
    .unwrap();

    let alice = create_customer(&state, "Alice", Some(address.id)).await?;
    let bob = create_customer(&state, "Bob", Some(address.id)).await?;

    // Two owners: the update must clone and repoint only the caller.
    let moved = customer_service::update_customer_address(
        &state,
        alice,
        AddressPayload::New(CreateAddressRequest {
            street: "Ringstrasse".into(),
            house_number: "3".into(),
            postal_code: "68161".into(),
            city: "Mannheim".into(),
            country: "DE".into(),
        }),
    )
    .await?
    .data
    .unwrap();
    assert_ne!(moved.id, address.id);
    assert_eq!(moved.street, "Ringstrasse");

    let alice_row = Customers::find_by_id(alice).one(&state.orm).await?.unwrap();
    let bob_row = Customers::find_by_id(bob).one(&state.orm).await?.unwrap();
    assert_eq!(alice_row.address_id, Some(moved.id));
    assert_eq!(bob_row.address_id, Some(address.id));

    // The original is untouched.
    let original = address_service::get_address(&state, address.id).await?.data.unwrap();
    assert_eq!(original.street, "Hauptstrasse");

    // Alice is now the only owner of the clone, so the next update is in place.
    let updated = customer_service::update_customer_address(
        &state,
        alice,
        AddressPayload::New(CreateAddressRequest {
            street: "Gartenweg".into(),
            house_number: "8".into(),
            postal_code: "68163".into(),
            city: "Mannheim".into(),
            country: "DE".into(),
        }),
    )
    .await?
    .data
    .unwrap();
    assert_eq!(updated.id, moved.id);
    assert_eq!(updated.street, "Gartenweg");

    // Linking an existing address just repoints the foreign key.
    let linked = customer_service::update_customer_address(
        &state,
        bob,
        AddressPayload::Existing { address_id: moved.id },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(linked.id, moved.id);
    let bob_row = Customers::find_by_id(bob).one(&state.orm).await?.unwrap();
    assert_eq!(bob_row.address_id, Some(moved.id));

    // A partial in-place update through the address endpoint keeps the id
    // and only touches the supplied fields.
    let patched = address_service::update_address(
        &state,
        address.id,
        UpdateAddressRequest {
            street: None,
            house_number: Some("14".into()),
            postal_code: None,
            city: None,
            country: None,
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(patched.id, address.id);
    assert_eq!(patched.house_number, "14");
    assert_eq!(patched.street, "Hauptstrasse");

    // Both customers point at the clone now. The orphaned original may go,
    // the referenced clone may not.
    address_service::delete_address(&state, address.id).await?;
    let err = address_service::delete_address(&state, moved.id).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

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

async fn create_customer(
    state: &AppState,
    first: &str,
    address_id: Option<i64>,
) -> anyhow::Result<i64> {
    let customer = CustomerActive {
        id: NotSet,
        first_name: Set(first.to_string()),
        last_name: Set("Tester".into()),
        address_id: Set(address_id),
        birth_date: Set(None),
        phone: Set(None),
        email: Set(None),
        initials: Set(None),
    }
    .insert(&state.orm)
    .await?;
    Ok(customer.id)
}
