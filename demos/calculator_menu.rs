use accounting_calculators::{
    calculate, BalanceSheetInput, BudgetCategory, BudgetEntry, BudgetInput, BudgetPeriod,
    CalculationRequest, CashFlowInput, CashInflows, CashOutflows, DepreciationInput,
    IncomeStatementInput, IndicatorInput, PayrollInput, ProfitMarginInput, TaxBreakdownInput,
    TaxRates,
};
use std::error::Error;
use std::fs;

fn sample_requests() -> Vec<CalculationRequest> {
    vec![
        CalculationRequest::Depreciation(DepreciationInput {
            asset_value: 60_000.0,
            useful_life_years: 5,
        }),
        CalculationRequest::ProfitMargin(ProfitMarginInput {
            total_cost: 75.0,
            sale_price: 120.0,
        }),
        CalculationRequest::TaxBreakdown(TaxBreakdownInput {
            base_value: 15_000.0,
            rates: TaxRates::default(),
        }),
        CalculationRequest::Payroll(PayrollInput {
            base_salary: 3200.0,
            overtime_hours: 12.0,
            overtime_hourly_rate: 28.5,
            meal_allowance: 550.0,
            transportation_allowance: true,
        }),
        CalculationRequest::BalanceSheet(BalanceSheetInput {
            current_assets: 480_000.0,
            available: 95_000.0,
            inventory: 160_000.0,
            total_assets: 1_250_000.0,
            current_liabilities: 310_000.0,
            total_liabilities: 690_000.0,
            equity: 560_000.0,
            net_profit: 84_000.0,
            net_sales: 1_100_000.0,
        }),
        CalculationRequest::Budget(BudgetInput {
            period: BudgetPeriod::Quarterly,
            entries: vec![
                BudgetEntry::new(BudgetCategory::Sales, 300_000.0, 342_000.0),
                BudgetEntry::new(BudgetCategory::Services, 80_000.0, 76_500.0),
                BudgetEntry::new(BudgetCategory::OperatingCosts, 120_000.0, 131_000.0),
                BudgetEntry::new(BudgetCategory::AdministrativeExpenses, 45_000.0, 44_000.0),
                BudgetEntry::new(BudgetCategory::PersonnelExpenses, 95_000.0, 97_000.0),
                BudgetEntry::new(BudgetCategory::Marketing, 20_000.0, 14_000.0),
            ],
        }),
        CalculationRequest::CashFlow(CashFlowInput {
            months: 6,
            opening_balance: 25_000.0,
            inflows: CashInflows {
                sales: 42_000.0,
                services: 8_000.0,
                other: 500.0,
            },
            outflows: CashOutflows {
                fixed_costs: 12_000.0,
                payroll: 26_000.0,
                taxes: 6_300.0,
                other: 1_200.0,
            },
            start_date: None,
        }),
        CalculationRequest::IncomeStatement(IncomeStatementInput {
            gross_revenue: 1_200_000.0,
            deductions: 140_000.0,
            cost_of_goods_sold: 610_000.0,
            selling_expenses: 95_000.0,
            administrative_expenses: 130_000.0,
            financial_expenses: 35_000.0,
        }),
        CalculationRequest::Indicators(IndicatorInput {
            revenue: 1_100_000.0,
            net_profit: 84_000.0,
            total_assets: 1_250_000.0,
            equity: 560_000.0,
            collection_period_days: 52.0,
            payment_period_days: 38.0,
            inventory_turnover: 6.0,
        }),
    ]
}

fn main() -> Result<(), Box<dyn Error>> {
    // Pass a JSON request file to run a single calculation, e.g.
    // {"calculator": "Payroll", "input": {"base_salary": 2000.0}}
    if let Some(path) = std::env::args().nth(1) {
        let json = fs::read_to_string(&path)?;
        let request = CalculationRequest::from_json(&json)?;
        let response = calculate(&request)?;
        println!("{}", response);
        return Ok(());
    }

    println!("🧮 Accounting Calculators");
    println!("═══════════════════════════════════════════════════════════════\n");

    for request in sample_requests() {
        match calculate(&request) {
            Ok(response) => println!("{}", response),
            Err(e) => eprintln!("❌ {}: {}", request.calculator(), e),
        }
        println!("───────────────────────────────────────────────────────────────\n");
    }

    Ok(())
}
