// Order endpoints
//
// Provisioning is two-phase: a host description goes into the cart, then
// the cart is checked out as an order. Orders are also read back to spot
// hostnames that are already on their way.

use reqwest::Method;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{CheckoutRequest, Order};

impl ApiClient {
    /// List all orders, including historical and cancelled ones.
    ///
    /// `GET /rest/orders`
    pub async fn list_orders(&self) -> Result<Vec<Order>, Error> {
        let url = self.rest_url("orders")?;
        debug!("listing orders");
        let orders: Vec<Order> = self.get_data(url).await?;
        debug!(count = orders.len(), "orders fetched");
        Ok(orders)
    }

    /// Put a host into the cart.
    ///
    /// `POST /rest/server_cart_items` with an already rendered JSON body.
    pub async fn add_to_cart(&self, body: String) -> Result<(), Error> {
        let url = self.rest_url("server_cart_items")?;
        debug!("adding server to cart");
        self.send(Method::POST, url, Some(body)).await.map(|_| ())
    }

    /// Check out the current cart.
    ///
    /// `POST /rest/orders` with `{"ts": <epoch millis>}`.
    pub async fn checkout(&self) -> Result<(), Error> {
        let url = self.rest_url("orders")?;
        let body = CheckoutRequest {
            ts: chrono::Utc::now().timestamp_millis(),
        };
        debug!(ts = body.ts, "checking out cart");
        self.send_discard(Method::POST, url, &body).await
    }
}
