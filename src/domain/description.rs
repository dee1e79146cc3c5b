//! Canned storefront description for canvas products

/// HTML description used when the merchandiser does not write one
pub const DEFAULT_CANVAS_DESCRIPTION: &str = r#"<p><strong>Canvas Info</strong></p>
<p>Available in a range of sizes, these matte canvases are stretched over a solid support face that resists sagging and stretching over time. Corners and edges are folded cleanly for a finished look.</p>

<p>Materials: cotton and polyester composite canvas, pine wood frame</p>
<p>Coating: UL-certified Greenguard Gold inks</p>
<p>Inks: non-hazardous, non-toxic, non-flammable latex inks</p>
<p>Back hanging included</p>
<p>Two rubber dots keep the canvas in place when hung</p>
<p>Frames are made from FSC certified renewable pine</p>

<p><strong>Processing and Shipping Times</strong></p>

<p>Please allow 3-6 business days for your order to be made</p>
<p>Standard shipping takes 3-8 days</p>
<p>Times are estimated by the mail service and may take longer</p>
<p>Please make sure your shipping address is correct before placing an order</p>
<p>Printed to order and shipped to most countries in the world.</p>

<p><strong>Returns &amp; Exchanges</strong></p>

<p>In case of a return, the buyer is responsible for the shipping cost.</p>
<p>Items that arrive damaged are refunded or re-printed.</p>
<p>Please report damage within 2 weeks of receiving the item.</p>"#;
