use std::fmt;
use std::rc::Rc;

use crate::runner::api::Engine;
use crate::runner::ds::error::ClassError;
use crate::runner::ds::object::InstanceRef;
use crate::runner::ds::value::Value;

pub type MethodBody = dyn Fn(&mut CallContext<'_>) -> Result<Value, ClassError>;

/// A behavior member. Whether it may reach the parent's same-named method
/// through [`CallContext::call_parent`] is declared up front with
/// [`Function::chained`].
#[derive(Clone)]
pub struct Function {
    body: Rc<MethodBody>,
    chains_parent: bool,
}

impl Function {
    pub fn new<F>(body: F) -> Self
    where
        F: Fn(&mut CallContext<'_>) -> Result<Value, ClassError> + 'static,
    {
        Function {
            body: Rc::new(body),
            chains_parent: false,
        }
    }

    /// A method that overrides and chains to the parent implementation.
    pub fn chained<F>(body: F) -> Self
    where
        F: Fn(&mut CallContext<'_>) -> Result<Value, ClassError> + 'static,
    {
        Function {
            body: Rc::new(body),
            chains_parent: true,
        }
    }

    pub fn chains_parent(&self) -> bool {
        self.chains_parent
    }

    pub fn same_body(&self, other: &Function) -> bool {
        Rc::ptr_eq(&self.body, &other.body)
    }

    pub(crate) fn call(&self, ctx: &mut CallContext<'_>) -> Result<Value, ClassError> {
        (self.body)(ctx)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function {{ chains_parent: {} }}", self.chains_parent)
    }
}

/// A method as installed on a class: the function, the class that declared
/// it, and the slot `call_parent` dispatches to.
pub struct MethodSlot {
    name: String,
    owner: String,
    function: Function,
    parent: Option<Rc<MethodSlot>>,
}

impl MethodSlot {
    pub fn new(name: &str, owner: &str, function: Function) -> Self {
        MethodSlot {
            name: name.to_string(),
            owner: owner.to_string(),
            function,
            parent: None,
        }
    }

    pub fn with_parent(mut self, parent: Option<Rc<MethodSlot>>) -> Self {
        self.parent = parent;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the class whose definition supplied this method.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn function(&self) -> &Function {
        &self.function
    }

    pub fn parent(&self) -> Option<&Rc<MethodSlot>> {
        self.parent.as_ref()
    }

    /// Depth of the super-dispatch chain below this slot.
    pub fn chain_depth(&self) -> usize {
        let mut depth = 0;
        let mut next = self.parent.as_ref();
        while let Some(slot) = next {
            depth += 1;
            next = slot.parent.as_ref();
        }
        depth
    }

    pub fn invoke(
        self: &Rc<Self>,
        engine: &Engine,
        this: Option<InstanceRef>,
        args: Vec<Value>,
    ) -> Result<Value, ClassError> {
        let mut ctx = CallContext::new(engine, this, args, Some(self.clone()));
        self.function.call(&mut ctx)
    }
}

/// The frame a method body runs in.
///
/// Super-dispatch state lives here rather than on the receiver: every call
/// gets its own context holding the slot being executed, so nested and
/// reentrant `call_parent` chains never see each other.
pub struct CallContext<'a> {
    engine: &'a Engine,
    this: Option<InstanceRef>,
    args: Vec<Value>,
    slot: Option<Rc<MethodSlot>>,
}

impl<'a> CallContext<'a> {
    pub(crate) fn new(
        engine: &'a Engine,
        this: Option<InstanceRef>,
        args: Vec<Value>,
        slot: Option<Rc<MethodSlot>>,
    ) -> Self {
        CallContext {
            engine,
            this,
            args,
            slot,
        }
    }

    pub fn engine(&self) -> &'a Engine {
        self.engine
    }

    /// The receiver. Static members run without one.
    pub fn this(&self) -> Result<InstanceRef, ClassError> {
        match &self.this {
            Some(this) => Ok(this.clone()),
            None => Err(ClassError::Type(format!(
                "{} was called without a receiver",
                self.method_name()
            ))),
        }
    }

    pub fn this_value(&self) -> Value {
        match &self.this {
            Some(this) => Value::Instance(this.clone()),
            None => Value::Undefined,
        }
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// The argument at `index`, `undefined` when it was not passed.
    pub fn arg(&self, index: usize) -> Value {
        self.args.get(index).cloned().unwrap_or(Value::Undefined)
    }

    pub fn get(&self, field: &str) -> Result<Value, ClassError> {
        Ok(self.this()?.borrow().get(field))
    }

    /// Assigns a field on the receiver and returns the previous value.
    pub fn set<V: Into<Value>>(&self, field: &str, value: V) -> Result<Value, ClassError> {
        Ok(self.this()?.borrow_mut().set(field, value.into()))
    }

    /// Calls another method on the same receiver, dispatching from the
    /// receiver's class.
    pub fn call_self(&self, method: &str, args: Vec<Value>) -> Result<Value, ClassError> {
        let this = self.this()?;
        self.engine.call(&this, method, args)
    }

    /// Invokes the parent's version of the executing method. Passing no
    /// arguments forwards the arguments of the current call.
    pub fn call_parent(&self, args: Vec<Value>) -> Result<Value, ClassError> {
        let slot = match &self.slot {
            Some(slot) => slot,
            None => {
                return Err(ClassError::Type(
                    "call_parent used outside of a method".to_string(),
                ))
            }
        };
        let parent = slot
            .parent()
            .ok_or_else(|| ClassError::MissingParentMethod {
                class: slot.owner().to_string(),
                method: slot.name().to_string(),
            })?;
        let args = if args.is_empty() {
            self.args.clone()
        } else {
            args
        };
        parent.invoke(self.engine, self.this.clone(), args)
    }

    /// The composition instance recorded for a mixin under `local`.
    pub fn mixin(&self, local: &str) -> Result<InstanceRef, ClassError> {
        let this = self.this()?;
        let class = this.borrow().class().clone();
        match class.mixin(local) {
            Some(entry) => Ok(entry.instance().clone()),
            None => Err(ClassError::Type(format!(
                "{} has no mixin named {}",
                class.name(),
                local
            ))),
        }
    }

    /// Runs a mixin's own implementation of `method` against the current
    /// receiver.
    pub fn call_mixin(
        &self,
        local: &str,
        method: &str,
        args: Vec<Value>,
    ) -> Result<Value, ClassError> {
        let this = self.this()?;
        let class = this.borrow().class().clone();
        let entry = class.mixin(local).ok_or_else(|| {
            ClassError::Type(format!("{} has no mixin named {}", class.name(), local))
        })?;
        let slot = entry
            .class()
            .method(method)
            .ok_or_else(|| ClassError::MethodNotFound {
                class: entry.class().name().to_string(),
                method: method.to_string(),
            })?;
        slot.invoke(self.engine, Some(this), args)
    }

    fn method_name(&self) -> String {
        match &self.slot {
            Some(slot) => format!("{}.{}", slot.owner(), slot.name()),
            None => "function".to_string(),
        }
    }
}
