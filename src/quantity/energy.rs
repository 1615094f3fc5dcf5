quantity!(KilowattHours, via: f64, suffix: "kWh", precision: 1);
