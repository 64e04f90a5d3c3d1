/// Marketplace order number as exported by the storefront.
/// Example: `5261219-59178`
pub type OrderNo = String;
/// Raw marketplace SKU string attached to an order line.
/// Example: `B09-B-Engraved-MAN10-LEDx1`
pub type MarketplaceSku = String;
/// Generated internal SKU (per-item or bundle).
/// Example: `Michael-J20-0121-Xaviar+Suzi`
pub type Sku = String;
/// Product family code, always the first SKU token.
/// Examples: `J20`, `B09`
pub type ProductCode = String;
/// Short token identifying a decorative insert card.
/// Examples: `MAN10`, `D17`
pub type CardCode = String;
/// Caller-supplied date tag substituted verbatim into generated SKUs.
/// Conventionally four digits (`MMDD`), e.g. `0121`
pub type DateTag = String;
/// Free-text customization note with `label: value` lines.
/// Example: `"Variants:Gold\nName 1:Xaviar\nName 2:Suzi"`
pub type SpecText = String;
/// Header name of a column in the batch input table.
/// Examples: `SKU`, `订单号`
pub type ColumnName = String;
/// Product image URL carried through to the import rows.
/// Example: `https://img.example.com/b09.jpg`
pub type ImageUrl = String;
