use utoipa::OpenApi;
use utoipa::openapi::OpenApi as OpenApiSpec;
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        addresses::{AddressList, CreateAddressRequest, PostalCodeQuery, UpdateAddressRequest},
        cart::{
            AddCartItemRequest, CartItemView, CartView, CheckoutRequest, CheckoutResponse,
            UpdateNoteRequest, UpdateQuantityRequest,
        },
        catalog::{
            CreateDishRequest, CreateMenuRequest, CreatePriceRequest, DishList, MenuList,
            PriceList, UpdateDishRequest, UpdateMenuRequest, UpdatePriceRequest,
        },
        customers::{
            AddressPayload, CreateCriticRequest, CreateCustomerRequest,
            CreateDeliveryAgentRequest, CriticList, CustomerList, DeliveryAgentList,
            UpdateCriticRequest, UpdateCustomerRequest, UpdateDeliveryAgentRequest,
        },
        hours::{
            AssignTemplateRequest, CreateTemplateRequest, DetailInput, TemplateList,
            TemplateWithDetails, UpdateTemplateRequest,
        },
        orders::{
            OrderDetail, OrderItemDetail, OrderList, OrderListQuery, OrderStatusView,
            UpdateOrderStatusRequest,
        },
        ratings::{
            BulkSummaryRequest, CreateCriticRatingRequest, CreateCustomerRatingRequest,
            CriticHighlight, CriticHighlightList, CriticRatingList, CustomerFavorite,
            CustomerFavoriteList, CustomerRatingList, RatingsSummary, RatingsSummaryList,
            SourceAggregate, UpdateCriticRatingRequest, UpdateCustomerRatingRequest,
        },
        restaurants::{
            CreateRestaurantRequest, DishWithPrices, MenuWithDishes, RestaurantDetail,
            RestaurantList, RestaurantQuery, UpdateRestaurantRequest,
        },
    },
    models::{
        Address, Critic, CriticRating, Customer, CustomerRating, DeliveryAgent, Dish, Menu,
        OpeningHoursDetail, OpeningHoursTemplate, Order, OrderItem, OrderStatus, Price, Restaurant,
    },
    response::{ApiResponse, Meta},
    routes::{addresses, cart, catalog, customers, health, hours, orders, params, ratings, restaurants},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        addresses::list_addresses,
        addresses::search_addresses,
        addresses::get_address,
        addresses::create_address,
        addresses::update_address,
        addresses::delete_address,
        customers::list_customers,
        customers::get_customer,
        customers::create_customer,
        customers::update_customer,
        customers::update_customer_address,
        customers::delete_customer,
        customers::list_critics,
        customers::get_critic,
        customers::create_critic,
        customers::update_critic,
        customers::delete_critic,
        customers::list_delivery_agents,
        customers::get_delivery_agent,
        customers::create_delivery_agent,
        customers::update_delivery_agent,
        customers::delete_delivery_agent,
        restaurants::list_restaurants,
        restaurants::get_restaurant,
        restaurants::get_restaurant_detail,
        restaurants::create_restaurant,
        restaurants::update_restaurant,
        restaurants::delete_restaurant,
        restaurants::get_restaurant_hours,
        restaurants::assign_hours_template,
        restaurants::ratings_summary,
        restaurants::ratings_summary_bulk,
        restaurants::critic_highlights,
        restaurants::customer_favorites,
        catalog::list_menus,
        catalog::get_menu,
        catalog::create_menu,
        catalog::update_menu,
        catalog::delete_menu,
        catalog::list_dishes,
        catalog::get_dish,
        catalog::create_dish,
        catalog::update_dish,
        catalog::delete_dish,
        catalog::get_active_price,
        catalog::list_prices,
        catalog::get_price,
        catalog::create_price,
        catalog::update_price,
        catalog::delete_price,
        cart::get_cart,
        cart::add_item,
        cart::update_quantity,
        cart::update_note,
        cart::remove_item,
        cart::clear_cart,
        cart::checkout,
        orders::list_orders,
        orders::list_by_customer,
        orders::get_order,
        orders::get_order_detail,
        orders::update_status,
        ratings::list_customer_ratings,
        ratings::get_customer_rating,
        ratings::create_customer_rating,
        ratings::update_customer_rating,
        ratings::delete_customer_rating,
        ratings::list_critic_ratings,
        ratings::get_critic_rating,
        ratings::create_critic_rating,
        ratings::update_critic_rating,
        ratings::delete_critic_rating,
        hours::list_templates,
        hours::get_template,
        hours::create_template,
        hours::update_template,
        hours::delete_template,
    ),
    components(
        schemas(
            Address,
            Customer,
            Critic,
            DeliveryAgent,
            Restaurant,
            Menu,
            Dish,
            Price,
            Order,
            OrderItem,
            OrderStatus,
            CustomerRating,
            CriticRating,
            OpeningHoursTemplate,
            OpeningHoursDetail,
            CreateAddressRequest,
            UpdateAddressRequest,
            AddressList,
            PostalCodeQuery,
            CreateCustomerRequest,
            UpdateCustomerRequest,
            AddressPayload,
            CustomerList,
            CreateCriticRequest,
            UpdateCriticRequest,
            CriticList,
            CreateDeliveryAgentRequest,
            UpdateDeliveryAgentRequest,
            DeliveryAgentList,
            CreateRestaurantRequest,
            UpdateRestaurantRequest,
            RestaurantQuery,
            RestaurantList,
            RestaurantDetail,
            MenuWithDishes,
            DishWithPrices,
            CreateMenuRequest,
            UpdateMenuRequest,
            MenuList,
            CreateDishRequest,
            UpdateDishRequest,
            DishList,
            CreatePriceRequest,
            UpdatePriceRequest,
            PriceList,
            AddCartItemRequest,
            UpdateQuantityRequest,
            UpdateNoteRequest,
            CheckoutRequest,
            CheckoutResponse,
            CartItemView,
            CartView,
            OrderListQuery,
            UpdateOrderStatusRequest,
            OrderList,
            OrderItemDetail,
            OrderDetail,
            OrderStatusView,
            CreateCustomerRatingRequest,
            UpdateCustomerRatingRequest,
            CustomerRatingList,
            CreateCriticRatingRequest,
            UpdateCriticRatingRequest,
            CriticRatingList,
            SourceAggregate,
            RatingsSummary,
            BulkSummaryRequest,
            RatingsSummaryList,
            CriticHighlight,
            CriticHighlightList,
            CustomerFavorite,
            CustomerFavoriteList,
            DetailInput,
            CreateTemplateRequest,
            UpdateTemplateRequest,
            TemplateWithDetails,
            TemplateList,
            AssignTemplateRequest,
            params::Pagination,
            params::SortOrder,
            Meta,
            ApiResponse<CartView>,
            ApiResponse<OrderDetail>,
            ApiResponse<RestaurantDetail>,
            ApiResponse<RatingsSummaryList>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Addresses", description = "Address book with copy-on-write updates"),
        (name = "Customers", description = "Customer endpoints"),
        (name = "Critics", description = "Food critic endpoints"),
        (name = "DeliveryAgents", description = "Delivery agent endpoints"),
        (name = "Restaurants", description = "Restaurant and menu tree endpoints"),
        (name = "Catalog", description = "Menus, dishes and prices"),
        (name = "Cart", description = "Per-customer cart and checkout"),
        (name = "Orders", description = "Placed order endpoints"),
        (name = "Ratings", description = "Customer and critic ratings with aggregates"),
        (name = "OpeningHours", description = "Opening hours templates"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
