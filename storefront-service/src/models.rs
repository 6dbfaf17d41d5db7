use pinkcart_shared::models::{Category, JoinEvent, Order, OrderStatus, Product, Role, User};
use serde::{Deserialize, Serialize};

// Request DTOs

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RecordJoinRequest {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub product_name: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPhoneNumberRequest {
    #[serde(default)]
    pub phone_number: String,
}

#[derive(Deserialize, Debug)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: f64,
    pub original_price: Option<f64>,
    pub image: Option<String>,
    pub image_id: Option<String>,
    pub images: Vec<String>,
    pub image_ids: Vec<String>,
    pub category: String,
    pub description: Option<String>,
    pub features: Vec<String>,
    pub in_stock: Option<bool>,
    pub shipping_estimate: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub original_price: Option<f64>,
    pub image: Option<String>,
    pub image_id: Option<String>,
    pub images: Option<Vec<String>>,
    pub image_ids: Option<Vec<String>>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub features: Option<Vec<String>>,
    pub in_stock: Option<bool>,
    pub joined_count: Option<u32>,
    pub shipping_estimate: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub image_id: Option<String>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub image_id: Option<String>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub product_id: String,
    pub quantity: Option<u32>,
    pub status: Option<OrderStatus>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateOrderRequest {
    pub quantity: Option<u32>,
    pub status: Option<OrderStatus>,
}

// Response DTOs

/// Public product view: internal image bookkeeping stripped, primary display
/// image resolved.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub images: Vec<String>,
    pub joined_count: u32,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub features: Vec<String>,
    pub in_stock: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_estimate: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        let image = product.primary_image();
        ProductResponse {
            id: product.id,
            name: product.name,
            price: product.price,
            original_price: product.original_price,
            image,
            images: product.images,
            joined_count: product.joined_count,
            category: product.category,
            description: product.description,
            features: product.features,
            in_stock: product.in_stock,
            shipping_estimate: product.shipping_estimate,
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        CategoryResponse {
            id: category.id,
            name: category.name,
            description: category.description,
            image: category.image,
            is_active: category.is_active,
            sort_order: category.sort_order,
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: String,
    pub display_name: String,
    pub product_id: String,
    pub product_name: String,
    pub joined_at: String,
}

impl From<JoinEvent> for CustomerResponse {
    fn from(event: JoinEvent) -> Self {
        CustomerResponse {
            id: event.id,
            display_name: event.display_name,
            product_id: event.product_id,
            product_name: event.product_name,
            joined_at: event.joined_at,
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub id: String,
    pub display_name: String,
    pub product_name: String,
    pub joined_at: String,
}

impl From<JoinEvent> for NotificationResponse {
    fn from(event: JoinEvent) -> Self {
        NotificationResponse {
            id: event.id,
            display_name: event.display_name,
            product_name: event.product_name,
            joined_at: event.joined_at,
        }
    }
}

/// User view without the password hash.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub role: Role,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct OrderUser {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct OrderProduct {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Admin order view with the referenced user and product resolved. Either
/// side may be gone (hard deletes do not cascade), in which case the raw id
/// is all that remains.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: String,
    pub user_id: String,
    pub product_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<OrderUser>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<OrderProduct>,
    pub quantity: u32,
    pub status: OrderStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl OrderResponse {
    pub fn from_order(order: Order, user: Option<&User>, product: Option<&Product>) -> Self {
        OrderResponse {
            id: order.id,
            user_id: order.user_id,
            product_id: order.product_id,
            user: user.map(|u| OrderUser {
                id: u.id.clone(),
                name: u.name.clone(),
                email: u.email.clone(),
            }),
            product: product.map(|p| OrderProduct {
                id: p.id.clone(),
                name: p.name.clone(),
                price: p.price,
                image: p.primary_image(),
            }),
            quantity: order.quantity,
            status: order.status,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}
