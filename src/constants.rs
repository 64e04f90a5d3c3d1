/// Constants used by marketplace SKU attribute extraction.
pub mod extract {
    /// Minimum number of `-`-delimited tokens for a parseable marketplace SKU.
    pub const MIN_TOKENS: usize = 3;
    /// Token marking an order as customized (matched case-insensitively).
    pub const CUSTOMIZATION_MARKER: &str = "engraved";
    /// Lowercased token prefixes recognized as packaging markers.
    ///
    /// Matched with `starts_with` so `LEDx1` and `whiteboxx1` count.
    pub const BOX_KEYWORDS: [&str; 3] = ["whitebox", "ledbox", "led"];
    /// Uppercase color letters recognized between the product code and the
    /// customization marker.
    pub const COLOR_LETTERS: [char; 4] = ['B', 'G', 'S', 'R'];
    /// Size/color tokens that are never card codes (compared case-insensitively).
    pub const NOISE_TOKENS: [&str; 8] = ["X", "SM", "SB", "B", "G", "S", "R", "L"];
}

/// Constants used by identifier generation.
pub mod identifiers {
    /// Store-name tag prefixed to every generated SKU.
    pub const STORE_TAG: &str = "Michael";
    /// Joiner between engraving names inside a per-item SKU.
    pub const NAME_JOINER: &str = "+";
    /// Combo-SKU suffix for the default white box.
    pub const WHITE_BOX_SUFFIX: &str = "WH";
    /// Combo-SKU suffix for the illuminated box.
    pub const LED_BOX_SUFFIX: &str = "LED";
    /// Number of trailing order-number characters kept in short identifiers.
    pub const SHORT_ID_ORDER_CHARS: usize = 5;
}

/// Constants used by the card-mapping registry resource.
pub mod registry {
    /// Reserved documentation key stripped from the card mapping at load time.
    pub const COMMENT_KEY: &str = "_comment";
}

/// Fixed listing metadata stamped onto generated import rows.
pub mod catalog {
    /// Internal SKU of the accessory bundled with every LED-box order.
    pub const LED_ACCESSORY_SKU: &str = "Michael-RED BOX";
    /// Category id assigned to generated single-SKU listings.
    pub const DEFAULT_CATEGORY_ID: &str = "1422034";
    /// Net and declared weight in grams.
    pub const DEFAULT_WEIGHT_GRAMS: u32 = 60;
    /// Purchase reference price in RMB.
    pub const DEFAULT_PURCHASE_PRICE_RMB: u32 = 1;
    /// Declared customs amount in USD.
    pub const DEFAULT_DECLARE_AMOUNT_USD: u32 = 12;
    /// Purchaser sub-account stamped onto single-SKU rows.
    pub const DEFAULT_PURCHASER: &str = "露露";
    /// Developer sub-account stamped onto single-SKU rows.
    pub const DEFAULT_DEVELOPER: &str = "露露";
    /// Sales-type label stamped onto generated rows.
    pub const DEFAULT_SALES_TYPE: &str = "售卖品";
}

/// Default header names of the storefront batch export.
pub mod columns {
    /// Marketplace SKU column.
    pub const MARKETPLACE_SKU: &str = "SKU";
    /// Order number column.
    pub const ORDER_NO: &str = "订单号";
    /// Customization note column.
    pub const SPEC_TEXT: &str = "产品规格";
    /// Optional product image URL column.
    pub const IMAGE_URL: &str = "图片URL";
}
