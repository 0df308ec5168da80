quantity!(Hours, suffix: "h", precision: 1);

impl Hours {
    pub const ONE_DAY: Self = Self(24.0);
}
