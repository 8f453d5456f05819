use crate::domain::ranges::Bounds;
use crate::utils::error::{BmiError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 取開頭最長的十進位數字片段，其後的文字（例如單位）忽略不計
fn leading_number(input: &str) -> &str {
    let bytes = input.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let int_end = digits_from(end);
    let mut mantissa_end = int_end;
    let mut has_digits = int_end > end;

    if bytes.get(int_end) == Some(&b'.') {
        let frac_end = digits_from(int_end + 1);
        if has_digits || frac_end > int_end + 1 {
            has_digits = true;
            mantissa_end = frac_end;
        }
    }

    if !has_digits {
        return "";
    }

    // 指數部分必須至少有一位數字，否則只取尾數
    let mut number_end = mantissa_end;
    if matches!(bytes.get(mantissa_end), Some(b'e') | Some(b'E')) {
        let mut exp_start = mantissa_end + 1;
        if matches!(bytes.get(exp_start), Some(b'+') | Some(b'-')) {
            exp_start += 1;
        }
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            number_end = exp_end;
        }
    }

    &input[..number_end]
}

/// 將使用者輸入解析為有限數值；開頭沒有數字、NaN、無限大一律視為無效
pub fn parse_measurement(field_name: &str, raw: &str) -> Result<f64> {
    let number = leading_number(raw.trim_start());
    if number.is_empty() {
        tracing::debug!("{} is not a number: {:?}", field_name, raw);
        return Err(BmiError::ValidationError);
    }

    match number.parse::<f64>() {
        Ok(value) if value.is_finite() => {
            if number.len() != raw.trim().len() {
                tracing::debug!("{} ignoring trailing text in {:?}", field_name, raw);
            }
            Ok(value)
        }
        _ => {
            tracing::debug!("{} is not a finite number: {:?}", field_name, raw);
            Err(BmiError::ValidationError)
        }
    }
}

/// 解析並檢查是否落在閉區間內
pub fn check_measurement(field_name: &str, raw: &str, bounds: &Bounds) -> Result<f64> {
    let value = parse_measurement(field_name, raw)?;
    if !bounds.contains(value) {
        tracing::debug!(
            "{} = {} outside [{}, {}]",
            field_name,
            value,
            bounds.min,
            bounds.max
        );
        return Err(BmiError::ValidationError);
    }
    Ok(value)
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(BmiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(BmiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// 設定檔中的範圍覆寫：必須有限、min ≤ max，且 min 不可低於 `floor`
pub fn validate_bounds(field_name: &str, bounds: &Bounds, floor: f64) -> Result<()> {
    let value = format!("[{}, {}]", bounds.min, bounds.max);

    if !bounds.min.is_finite() || !bounds.max.is_finite() {
        return Err(BmiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value,
            reason: "Bounds must be finite numbers".to_string(),
        });
    }

    if bounds.min > bounds.max {
        return Err(BmiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value,
            reason: "min must not exceed max".to_string(),
        });
    }

    if bounds.min < floor {
        return Err(BmiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value,
            reason: format!("min must be at least {}", floor),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_measurement() {
        assert_eq!(parse_measurement("height", "170").unwrap(), 170.0);
        assert_eq!(parse_measurement("height", " 170.5 ").unwrap(), 170.5);
        assert!(parse_measurement("height", "").is_err());
        assert!(parse_measurement("height", "   ").is_err());
        assert!(parse_measurement("height", "abc").is_err());
        assert!(parse_measurement("height", "NaN").is_err());
        assert!(parse_measurement("height", "inf").is_err());
        assert!(parse_measurement("height", "-").is_err());
        assert!(parse_measurement("height", ".").is_err());
        assert!(parse_measurement("height", "1e999").is_err());
    }

    #[test]
    fn test_parse_measurement_uses_leading_number() {
        assert_eq!(parse_measurement("height", "170cm").unwrap(), 170.0);
        assert_eq!(parse_measurement("weight", "70 kg").unwrap(), 70.0);
        assert_eq!(parse_measurement("weight", "  +70.5.3").unwrap(), 70.5);
        assert_eq!(parse_measurement("inches", ".5in").unwrap(), 0.5);
        assert_eq!(parse_measurement("inches", "7.").unwrap(), 7.0);
        assert_eq!(parse_measurement("inches", "-1").unwrap(), -1.0);
        assert_eq!(parse_measurement("height", "1.7e2cm").unwrap(), 170.0);
        assert_eq!(parse_measurement("height", "170e").unwrap(), 170.0);
        assert_eq!(parse_measurement("height", "170e+").unwrap(), 170.0);
        assert!(parse_measurement("height", "cm170").is_err());
        assert!(parse_measurement("height", "Infinity").is_err());
    }

    #[test]
    fn test_check_measurement_bounds() {
        let bounds = Bounds::new(50.0, 250.0);
        assert_eq!(check_measurement("height", "50", &bounds).unwrap(), 50.0);
        assert_eq!(check_measurement("height", "250", &bounds).unwrap(), 250.0);
        assert!(matches!(
            check_measurement("height", "40", &bounds),
            Err(BmiError::ValidationError)
        ));
        assert!(check_measurement("height", "250.01", &bounds).is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output_path", "./output").is_ok());
        assert!(validate_path("output_path", "").is_err());
        assert!(validate_path("output_path", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_bounds() {
        assert!(validate_bounds("inches", &Bounds::new(0.0, 11.0), 0.0).is_ok());
        assert!(validate_bounds("height_cm", &Bounds::new(0.0, 250.0), 1.0).is_err());
        assert!(validate_bounds("height_cm", &Bounds::new(300.0, 250.0), 1.0).is_err());
        assert!(validate_bounds("height_cm", &Bounds::new(50.0, f64::INFINITY), 1.0).is_err());
        assert!(validate_bounds("inches", &Bounds::new(-1.0, 11.0), 0.0).is_err());
    }
}
