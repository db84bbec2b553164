use storefront_core::{
    CardNumber, CountryCode, CountryCount, CreditCard, CreditCardId, Customer, CustomerCard,
    CustomerId, CustomerOrderCount, Error, Order, OrderId, PlayerName, Price, Product, ProductId,
    Quantity, Result, TopScore,
};

use super::queries::{
    RawCountryCount, RawCreditCard, RawCustomer, RawCustomerCard, RawCustomerOrderCount,
    RawOrder, RawProduct, RawTopScore,
};

fn country_code(value: Option<String>) -> Result<Option<CountryCode>> {
    value.map(CountryCode::new).transpose()
}

fn quantity(value: Option<i64>) -> Result<Option<Quantity>> {
    value
        .map(|raw| {
            let raw = u32::try_from(raw)
                .map_err(|_| Error::Db(format!("stored quantity out of range: {raw}")))?;
            Quantity::new(raw)
        })
        .transpose()
}

pub fn map_customer(raw: RawCustomer) -> Result<Customer> {
    Ok(Customer {
        id: CustomerId(raw.id),
        fullname: raw.fullname,
        email: raw.email,
        address: raw.address,
        country_code: country_code(raw.country_code)?,
    })
}

pub fn map_customers(raw: Vec<RawCustomer>) -> Result<Vec<Customer>> {
    raw.into_iter().map(map_customer).collect()
}

pub fn map_credit_card(raw: RawCreditCard) -> Result<CreditCard> {
    Ok(CreditCard {
        id: CreditCardId(raw.id),
        number: CardNumber::new(raw.number)?,
        customer_id: CustomerId(raw.customer_id),
    })
}

pub fn map_product(raw: RawProduct) -> Result<Product> {
    Ok(Product {
        id: ProductId(raw.id),
        name: raw.name,
        price: Price::new(raw.price)?,
        description: raw.description,
        category: raw.category,
    })
}

pub fn map_order(raw: RawOrder) -> Result<Order> {
    Ok(Order {
        id: OrderId(raw.id),
        customer_id: CustomerId(raw.customer_id),
        product_id: ProductId(raw.product_id),
        quantity: quantity(raw.quantity)?,
    })
}

pub fn map_orders(raw: Vec<RawOrder>) -> Result<Vec<Order>> {
    raw.into_iter().map(map_order).collect()
}

pub fn map_country_counts(raw: Vec<RawCountryCount>) -> Result<Vec<CountryCount>> {
    raw.into_iter()
        .map(|row| {
            Ok(CountryCount {
                country_code: country_code(row.country_code)?,
                customers: row.customers,
            })
        })
        .collect()
}

pub fn map_customer_cards(raw: Vec<RawCustomerCard>) -> Result<Vec<CustomerCard>> {
    raw.into_iter()
        .map(|row| {
            Ok(CustomerCard {
                fullname: row.fullname,
                address: row.address,
                number: CardNumber::new(row.number)?,
            })
        })
        .collect()
}

pub fn map_customer_order_counts(raw: Vec<RawCustomerOrderCount>) -> Vec<CustomerOrderCount> {
    raw.into_iter()
        .map(|row| CustomerOrderCount {
            customer_id: CustomerId(row.customer_id),
            orders: row.order_count,
        })
        .collect()
}

pub fn map_top_scores(raw: Vec<RawTopScore>) -> Result<Vec<TopScore>> {
    raw.into_iter()
        .map(|row| {
            Ok(TopScore {
                player: PlayerName::new(row.player)?,
                score: row.top_score,
            })
        })
        .collect()
}
