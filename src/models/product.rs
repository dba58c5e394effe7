use std::fmt;

/// String-keyed product identifier as carried by navigation routes.
///
/// The backend id is numeric, but route parameters arrive as strings; keeping
/// the string form means a malformed route segment becomes a failed lookup
/// instead of a parse error.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// Reference to one product image (absolute URL).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pricing fields carried alongside the sale price. Cost and margin feed the
/// admin surface; the detail view only renders `price`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pricing {
    pub cost: f64,
    pub margin_percent: f64,
    pub price: f64,
}

/// Reference to the owning category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRef {
    pub id: u64,
    pub name: String,
}

/// Immutable product data fetched for one id.
///
/// Owned by the resolver until handed to the view; thereafter owned by the
/// view for its lifetime.
#[derive(Debug, Clone)]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub title: String,
    pub sku: String,
    pub description: String,
    /// Ordered gallery images; the first one is the initial cover.
    pub images: Vec<ImageRef>,
    pub pricing: Pricing,
    pub stock: u32,
    pub category: CategoryRef,
    pub is_offer: bool,
}

impl ProductSnapshot {
    /// First image, used as the cover when the gallery initializes.
    pub fn cover(&self) -> Option<&ImageRef> {
        self.images.first()
    }

    /// Image at `index`, if in range.
    pub fn image(&self, index: usize) -> Option<&ImageRef> {
        self.images.get(index)
    }
}
