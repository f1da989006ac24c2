//! 256 entry "jet" color table, normalized `[r, g, b]`.
//! Dark blue through cyan, yellow and red to dark red.

pub const JET_LEN: usize = 256;

#[rustfmt::skip]
pub const JET: [[f64; 3]; JET_LEN] = [
    [0.000000, 0.000000, 0.515625], [0.000000, 0.000000, 0.531250], [0.000000, 0.000000, 0.546875], [0.000000, 0.000000, 0.562500],
    [0.000000, 0.000000, 0.578125], [0.000000, 0.000000, 0.593750], [0.000000, 0.000000, 0.609375], [0.000000, 0.000000, 0.625000],
    [0.000000, 0.000000, 0.640625], [0.000000, 0.000000, 0.656250], [0.000000, 0.000000, 0.671875], [0.000000, 0.000000, 0.687500],
    [0.000000, 0.000000, 0.703125], [0.000000, 0.000000, 0.718750], [0.000000, 0.000000, 0.734375], [0.000000, 0.000000, 0.750000],
    [0.000000, 0.000000, 0.765625], [0.000000, 0.000000, 0.781250], [0.000000, 0.000000, 0.796875], [0.000000, 0.000000, 0.812500],
    [0.000000, 0.000000, 0.828125], [0.000000, 0.000000, 0.843750], [0.000000, 0.000000, 0.859375], [0.000000, 0.000000, 0.875000],
    [0.000000, 0.000000, 0.890625], [0.000000, 0.000000, 0.906250], [0.000000, 0.000000, 0.921875], [0.000000, 0.000000, 0.937500],
    [0.000000, 0.000000, 0.953125], [0.000000, 0.000000, 0.968750], [0.000000, 0.000000, 0.984375], [0.000000, 0.000000, 1.000000],
    [0.000000, 0.015625, 1.000000], [0.000000, 0.031250, 1.000000], [0.000000, 0.046875, 1.000000], [0.000000, 0.062500, 1.000000],
    [0.000000, 0.078125, 1.000000], [0.000000, 0.093750, 1.000000], [0.000000, 0.109375, 1.000000], [0.000000, 0.125000, 1.000000],
    [0.000000, 0.140625, 1.000000], [0.000000, 0.156250, 1.000000], [0.000000, 0.171875, 1.000000], [0.000000, 0.187500, 1.000000],
    [0.000000, 0.203125, 1.000000], [0.000000, 0.218750, 1.000000], [0.000000, 0.234375, 1.000000], [0.000000, 0.250000, 1.000000],
    [0.000000, 0.265625, 1.000000], [0.000000, 0.281250, 1.000000], [0.000000, 0.296875, 1.000000], [0.000000, 0.312500, 1.000000],
    [0.000000, 0.328125, 1.000000], [0.000000, 0.343750, 1.000000], [0.000000, 0.359375, 1.000000], [0.000000, 0.375000, 1.000000],
    [0.000000, 0.390625, 1.000000], [0.000000, 0.406250, 1.000000], [0.000000, 0.421875, 1.000000], [0.000000, 0.437500, 1.000000],
    [0.000000, 0.453125, 1.000000], [0.000000, 0.468750, 1.000000], [0.000000, 0.484375, 1.000000], [0.000000, 0.500000, 1.000000],
    [0.000000, 0.515625, 1.000000], [0.000000, 0.531250, 1.000000], [0.000000, 0.546875, 1.000000], [0.000000, 0.562500, 1.000000],
    [0.000000, 0.578125, 1.000000], [0.000000, 0.593750, 1.000000], [0.000000, 0.609375, 1.000000], [0.000000, 0.625000, 1.000000],
    [0.000000, 0.640625, 1.000000], [0.000000, 0.656250, 1.000000], [0.000000, 0.671875, 1.000000], [0.000000, 0.687500, 1.000000],
    [0.000000, 0.703125, 1.000000], [0.000000, 0.718750, 1.000000], [0.000000, 0.734375, 1.000000], [0.000000, 0.750000, 1.000000],
    [0.000000, 0.765625, 1.000000], [0.000000, 0.781250, 1.000000], [0.000000, 0.796875, 1.000000], [0.000000, 0.812500, 1.000000],
    [0.000000, 0.828125, 1.000000], [0.000000, 0.843750, 1.000000], [0.000000, 0.859375, 1.000000], [0.000000, 0.875000, 1.000000],
    [0.000000, 0.890625, 1.000000], [0.000000, 0.906250, 1.000000], [0.000000, 0.921875, 1.000000], [0.000000, 0.937500, 1.000000],
    [0.000000, 0.953125, 1.000000], [0.000000, 0.968750, 1.000000], [0.000000, 0.984375, 1.000000], [0.000000, 1.000000, 1.000000],
    [0.015625, 1.000000, 0.984375], [0.031250, 1.000000, 0.968750], [0.046875, 1.000000, 0.953125], [0.062500, 1.000000, 0.937500],
    [0.078125, 1.000000, 0.921875], [0.093750, 1.000000, 0.906250], [0.109375, 1.000000, 0.890625], [0.125000, 1.000000, 0.875000],
    [0.140625, 1.000000, 0.859375], [0.156250, 1.000000, 0.843750], [0.171875, 1.000000, 0.828125], [0.187500, 1.000000, 0.812500],
    [0.203125, 1.000000, 0.796875], [0.218750, 1.000000, 0.781250], [0.234375, 1.000000, 0.765625], [0.250000, 1.000000, 0.750000],
    [0.265625, 1.000000, 0.734375], [0.281250, 1.000000, 0.718750], [0.296875, 1.000000, 0.703125], [0.312500, 1.000000, 0.687500],
    [0.328125, 1.000000, 0.671875], [0.343750, 1.000000, 0.656250], [0.359375, 1.000000, 0.640625], [0.375000, 1.000000, 0.625000],
    [0.390625, 1.000000, 0.609375], [0.406250, 1.000000, 0.593750], [0.421875, 1.000000, 0.578125], [0.437500, 1.000000, 0.562500],
    [0.453125, 1.000000, 0.546875], [0.468750, 1.000000, 0.531250], [0.484375, 1.000000, 0.515625], [0.500000, 1.000000, 0.500000],
    [0.515625, 1.000000, 0.484375], [0.531250, 1.000000, 0.468750], [0.546875, 1.000000, 0.453125], [0.562500, 1.000000, 0.437500],
    [0.578125, 1.000000, 0.421875], [0.593750, 1.000000, 0.406250], [0.609375, 1.000000, 0.390625], [0.625000, 1.000000, 0.375000],
    [0.640625, 1.000000, 0.359375], [0.656250, 1.000000, 0.343750], [0.671875, 1.000000, 0.328125], [0.687500, 1.000000, 0.312500],
    [0.703125, 1.000000, 0.296875], [0.718750, 1.000000, 0.281250], [0.734375, 1.000000, 0.265625], [0.750000, 1.000000, 0.250000],
    [0.765625, 1.000000, 0.234375], [0.781250, 1.000000, 0.218750], [0.796875, 1.000000, 0.203125], [0.812500, 1.000000, 0.187500],
    [0.828125, 1.000000, 0.171875], [0.843750, 1.000000, 0.156250], [0.859375, 1.000000, 0.140625], [0.875000, 1.000000, 0.125000],
    [0.890625, 1.000000, 0.109375], [0.906250, 1.000000, 0.093750], [0.921875, 1.000000, 0.078125], [0.937500, 1.000000, 0.062500],
    [0.953125, 1.000000, 0.046875], [0.968750, 1.000000, 0.031250], [0.984375, 1.000000, 0.015625], [1.000000, 1.000000, 0.000000],
    [1.000000, 0.984375, 0.000000], [1.000000, 0.968750, 0.000000], [1.000000, 0.953125, 0.000000], [1.000000, 0.937500, 0.000000],
    [1.000000, 0.921875, 0.000000], [1.000000, 0.906250, 0.000000], [1.000000, 0.890625, 0.000000], [1.000000, 0.875000, 0.000000],
    [1.000000, 0.859375, 0.000000], [1.000000, 0.843750, 0.000000], [1.000000, 0.828125, 0.000000], [1.000000, 0.812500, 0.000000],
    [1.000000, 0.796875, 0.000000], [1.000000, 0.781250, 0.000000], [1.000000, 0.765625, 0.000000], [1.000000, 0.750000, 0.000000],
    [1.000000, 0.734375, 0.000000], [1.000000, 0.718750, 0.000000], [1.000000, 0.703125, 0.000000], [1.000000, 0.687500, 0.000000],
    [1.000000, 0.671875, 0.000000], [1.000000, 0.656250, 0.000000], [1.000000, 0.640625, 0.000000], [1.000000, 0.625000, 0.000000],
    [1.000000, 0.609375, 0.000000], [1.000000, 0.593750, 0.000000], [1.000000, 0.578125, 0.000000], [1.000000, 0.562500, 0.000000],
    [1.000000, 0.546875, 0.000000], [1.000000, 0.531250, 0.000000], [1.000000, 0.515625, 0.000000], [1.000000, 0.500000, 0.000000],
    [1.000000, 0.484375, 0.000000], [1.000000, 0.468750, 0.000000], [1.000000, 0.453125, 0.000000], [1.000000, 0.437500, 0.000000],
    [1.000000, 0.421875, 0.000000], [1.000000, 0.406250, 0.000000], [1.000000, 0.390625, 0.000000], [1.000000, 0.375000, 0.000000],
    [1.000000, 0.359375, 0.000000], [1.000000, 0.343750, 0.000000], [1.000000, 0.328125, 0.000000], [1.000000, 0.312500, 0.000000],
    [1.000000, 0.296875, 0.000000], [1.000000, 0.281250, 0.000000], [1.000000, 0.265625, 0.000000], [1.000000, 0.250000, 0.000000],
    [1.000000, 0.234375, 0.000000], [1.000000, 0.218750, 0.000000], [1.000000, 0.203125, 0.000000], [1.000000, 0.187500, 0.000000],
    [1.000000, 0.171875, 0.000000], [1.000000, 0.156250, 0.000000], [1.000000, 0.140625, 0.000000], [1.000000, 0.125000, 0.000000],
    [1.000000, 0.109375, 0.000000], [1.000000, 0.093750, 0.000000], [1.000000, 0.078125, 0.000000], [1.000000, 0.062500, 0.000000],
    [1.000000, 0.046875, 0.000000], [1.000000, 0.031250, 0.000000], [1.000000, 0.015625, 0.000000], [1.000000, 0.000000, 0.000000],
    [0.984375, 0.000000, 0.000000], [0.968750, 0.000000, 0.000000], [0.953125, 0.000000, 0.000000], [0.937500, 0.000000, 0.000000],
    [0.921875, 0.000000, 0.000000], [0.906250, 0.000000, 0.000000], [0.890625, 0.000000, 0.000000], [0.875000, 0.000000, 0.000000],
    [0.859375, 0.000000, 0.000000], [0.843750, 0.000000, 0.000000], [0.828125, 0.000000, 0.000000], [0.812500, 0.000000, 0.000000],
    [0.796875, 0.000000, 0.000000], [0.781250, 0.000000, 0.000000], [0.765625, 0.000000, 0.000000], [0.750000, 0.000000, 0.000000],
    [0.734375, 0.000000, 0.000000], [0.718750, 0.000000, 0.000000], [0.703125, 0.000000, 0.000000], [0.687500, 0.000000, 0.000000],
    [0.671875, 0.000000, 0.000000], [0.656250, 0.000000, 0.000000], [0.640625, 0.000000, 0.000000], [0.625000, 0.000000, 0.000000],
    [0.609375, 0.000000, 0.000000], [0.593750, 0.000000, 0.000000], [0.578125, 0.000000, 0.000000], [0.562500, 0.000000, 0.000000],
    [0.546875, 0.000000, 0.000000], [0.531250, 0.000000, 0.000000], [0.515625, 0.000000, 0.000000], [0.500000, 0.000000, 0.000000],
];

/// Index into `JET` for a value normalized to `[0, 1]`.
/// Values outside the range are clamped.
pub fn jet_index(normalized: f64) -> usize {
    let index = (normalized.clamp(0.0, 1.0) * (JET_LEN - 1) as f64).round();
    // NaN clamps to NaN and casts to 0
    index as usize
}
